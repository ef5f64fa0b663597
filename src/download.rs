use std::fs::{self, File};
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::consts;

/// Fetch the three reference inputs into the local `data/` directory,
/// creating it if absent. Each fetch is a single streamed GET with no retry.
pub fn download_all() -> Result<()> {
    fs::create_dir_all(consts::DATA_DIR)
        .with_context(|| format!("Failed to create directory: {}", consts::DATA_DIR))?;

    log::info!("Start download annotations");
    fetch(
        consts::ANNOTATIONS_URL,
        &Path::new(consts::DATA_DIR).join("annotations.gff3.gz"),
    )?;
    log::info!("End download annotations");

    log::info!("Start download variants");
    fetch(
        consts::VARIANTS_URL,
        &Path::new(consts::DATA_DIR).join("variants.vcf.gz"),
    )?;
    log::info!("End download variants");

    log::info!("Start download sequence");
    fetch(
        consts::REFERENCES_URL,
        &Path::new(consts::DATA_DIR).join("references.fasta.gz"),
    )?;
    log::info!("End download sequence");

    Ok(())
}

fn fetch(url: &str, dest: &Path) -> Result<()> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| anyhow!("Failed to GET {}: {}", url, e))?;

    let mut reader = response.into_reader();
    let mut file =
        File::create(dest).with_context(|| format!("Failed to create file: {:?}", dest))?;
    std::io::copy(&mut reader, &mut file)
        .with_context(|| format!("Failed to write file: {:?}", dest))?;

    Ok(())
}
