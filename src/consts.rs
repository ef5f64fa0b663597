pub const BIN_NAME: &str = "refsub";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DOWNLOAD_CMD: &str = "download";
pub const SUBSAMPLE_CMD: &str = "subsample";

pub const DATA_DIR: &str = "data";

pub const ANNOTATIONS_URL: &str = "https://ftp.ebi.ac.uk/pub/databases/gencode/Gencode_human/release_47/gencode.v47.basic.annotation.gff3.gz";
pub const VARIANTS_URL: &str = "https://ftp-trace.ncbi.nlm.nih.gov/ReferenceSamples/giab/release/NA12878_HG001/latest/GRCh38/HG001_GRCh38_1_22_v4.2.1_benchmark.vcf.gz";
pub const REFERENCES_URL: &str = "https://ftp.ebi.ac.uk/pub/databases/gencode/Gencode_human/release_47/GRCh38.primary_assembly.genome.fa.gz";

pub const DEFAULT_SEED: u64 = 42;

pub const DEFAULT_NB_GENES: usize = 20;
pub const DEFAULT_TRANSCRIPT_RANGE: (usize, usize) = (1, 5);
pub const DEFAULT_NB_CHROMOSOMES: usize = 3;
pub const DEFAULT_GENE_GAP_RANGE: (u64, u64) = (50, 500);

pub const DEFAULT_NB_SNV: usize = 20;
pub const DEFAULT_NB_INDEL: usize = 20;
pub const DEFAULT_INDEL_LEN_RANGE: (u64, u64) = (2, 5);
pub const DEFAULT_NB_STRUCT: usize = 10;
pub const DEFAULT_STRUCT_LEN_RANGE: (u64, u64) = (50, 1000);

pub const STRUCT_TYPES: &[&str] = &["INS", "DEL", "DUP", "INV", "CNV"];

/// Alphabet used for generated filler and insertion sequences.
pub const NUCLEOTIDES: &[u8] = b"actg";
