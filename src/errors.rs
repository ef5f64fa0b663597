use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubsampleError {
    #[error("No gene with exactly {0} transcripts available for selection")]
    EmptyTranscriptBucket(usize),

    #[error("Feature id not present in annotation index: {0}")]
    UnknownFeature(String),

    #[error("Sequence name not present in reference input: {0}")]
    UnknownSequence(String),

    #[error("Sequence data found before the first FASTA header")]
    MissingFastaHeader,

    #[error("Structural variants require a previously drawn chromosome")]
    NoChromosomeDrawn,
}
