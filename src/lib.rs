//! # Refsub: deterministic genomic test-fixture subsampler
//!
//! Refsub prepares small synthetic genomics test fixtures (annotation
//! records, reference sequence, variant calls) from large public reference
//! datasets, for exercising a downstream variant-annotation tool.
//!
//! It has exactly two jobs:
//!
//! 1. **download** - fetch the reference annotation, benchmark variants and
//!    genome sequence from their public archives into `data/`.
//! 2. **subsample** - deterministically pick a handful of genes stratified by
//!    transcript count, relocate them (with their transcripts and exons) onto
//!    a few synthetic chromosomes, and synthesize random variant records
//!    against the resulting sequences. One seed fully determines the three
//!    output files.
//!
//! ## Example
//!
//! ```bash
//! refsub download
//! refsub subsample \
//!     -a data/annotations.gff3.gz -r data/references.fasta.gz \
//!     -A annotations.gff3 -R references.fasta -V variants.vcf \
//!     -s 42
//! ```
//!
//! ## Module Structure
//!
//! - [`models`] - annotation records and the two input indexes
//! - [`io`] - magic-byte gzip detection and the three output writers
//! - [`subsample`] - seeded gene selection and relocation
//! - [`variants`] - seeded variant synthesis over the synthetic sequences
//! - [`download`] - the three reference-dataset fetches
//! - [`cli`] - command-line interface implementation

pub mod cli;
pub mod consts;
pub mod download;
pub mod errors;
pub mod io;
pub mod models;
pub mod subsample;
pub mod variants;

// Re-export commonly used types
pub use errors::SubsampleError;
pub use models::{AnnotationIndex, GffRecord, SequenceIndex};
pub use subsample::{subsample, Subsample, SubsampleParams, SyntheticChromosome, SyntheticGenome};
pub use variants::synthesize_variants;
