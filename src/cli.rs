use clap::{value_parser, Arg, Command};

use crate::consts;

pub fn create_download_cli() -> Command {
    Command::new(consts::DOWNLOAD_CMD)
        .about("Download the reference datasets into the data/ directory")
}

pub fn create_subsample_cli() -> Command {
    Command::new(consts::SUBSAMPLE_CMD)
        .about("Subsample reference datasets into a small synthetic fixture trio")
        .arg(
            Arg::new("annotations-input")
                .short('a')
                .long("annotations-input")
                .value_name("FILE")
                .help("Annotations input path (plain or gzip)")
                .required(true),
        )
        .arg(
            Arg::new("references-input")
                .short('r')
                .long("references-input")
                .value_name("FILE")
                .help("Reference sequence input path (plain or gzip)")
                .required(true),
        )
        .arg(
            Arg::new("annotations-output")
                .short('A')
                .long("annotations-output")
                .value_name("FILE")
                .help("Annotations output path")
                .required(true),
        )
        .arg(
            Arg::new("references-output")
                .short('R')
                .long("references-output")
                .value_name("FILE")
                .help("Reference sequence output path")
                .required(true),
        )
        .arg(
            Arg::new("variants-output")
                .short('V')
                .long("variants-output")
                .value_name("FILE")
                .help("Variants output path")
                .required(true),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .value_name("NUMBER")
                .help("Random seed")
                .value_parser(value_parser!(u64))
                .default_value("42"),
        )
}

pub mod handlers {
    use std::path::{Path, PathBuf};

    use anyhow::Result;
    use clap::ArgMatches;
    use rand::prelude::*;

    use crate::download;
    use crate::io::{get_dynamic_reader, write_annotations, write_sequences, write_variants};
    use crate::models::{AnnotationIndex, SequenceIndex};
    use crate::subsample::{subsample, SubsampleParams};
    use crate::variants::synthesize_variants;

    pub fn run_download(_matches: &ArgMatches) -> Result<()> {
        download::download_all()
    }

    pub fn run_subsample(matches: &ArgMatches) -> Result<()> {
        let annotations_input = matches
            .get_one::<String>("annotations-input")
            .expect("An annotations input path is required.");
        let references_input = matches
            .get_one::<String>("references-input")
            .expect("A reference sequence input path is required.");
        let annotations_output = matches
            .get_one::<String>("annotations-output")
            .expect("An annotations output path is required.");
        let references_output = matches
            .get_one::<String>("references-output")
            .expect("A reference sequence output path is required.");
        let variants_output = matches
            .get_one::<String>("variants-output")
            .expect("A variants output path is required.");
        let seed = *matches.get_one::<u64>("seed").expect("seed has a default");

        subsample_to_files(
            &PathBuf::from(annotations_input),
            &PathBuf::from(references_input),
            &PathBuf::from(annotations_output),
            &PathBuf::from(references_output),
            &PathBuf::from(variants_output),
            &SubsampleParams::default(),
            seed,
        )
    }

    /// Run the whole subsample pipeline between concrete paths.
    ///
    /// One seeded generator drives every selection and synthesis step, so the
    /// three outputs are a pure function of the inputs, the parameters and
    /// the seed.
    pub fn subsample_to_files(
        annotations_input: &Path,
        references_input: &Path,
        annotations_output: &Path,
        references_output: &Path,
        variants_output: &Path,
        params: &SubsampleParams,
        seed: u64,
    ) -> Result<()> {
        let mut rng = StdRng::seed_from_u64(seed);

        log::info!("Start read annotation input");
        let annotations = AnnotationIndex::from_reader(get_dynamic_reader(annotations_input)?)?;
        log::info!("End read annotation input");

        log::info!("Start read reference input");
        let sequences = SequenceIndex::from_reader(get_dynamic_reader(references_input)?)?;
        log::info!("End read reference input");

        log::info!("Start extract and edit annotation");
        let result = subsample(&annotations, &sequences, params, &mut rng)?;
        log::info!("End extract and edit annotation");

        log::info!("Start generate variant");
        let variant_lines = synthesize_variants(&result.genome, params, &mut rng)?;
        log::info!("End generate variant");

        log::info!("Start write annotation");
        write_annotations(annotations_output, &result.records)?;
        log::info!("End write annotation");

        log::info!("Start write reference");
        write_sequences(references_output, &result.genome)?;
        log::info!("End write reference");

        log::info!("Start write variant");
        write_variants(variants_output, &variant_lines)?;
        log::info!("End write variant");

        Ok(())
    }
}
