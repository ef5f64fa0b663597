use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

use crate::models::GffRecord;
use crate::subsample::SyntheticGenome;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// Compression is detected from the first two bytes of the file, not from the
/// extension, so renamed or extension-less inputs still decompress.
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let mut magic = [0u8; 2];
    let mut probe =
        File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let read = probe
        .read(&mut magic)
        .with_context(|| format!("Failed to read file: {:?}", path))?;
    let is_gzipped = read == 2 && magic == GZIP_MAGIC;

    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Write relocated annotation records, one tab-joined line per record.
pub fn write_annotations(path: &Path, records: &[GffRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create annotations output: {:?}", path))?;
    let mut writer = BufWriter::new(file);

    for record in records {
        writeln!(writer, "{}", record.to_line())?;
    }

    Ok(())
}

/// Write the synthetic sequences as two-line FASTA blocks, in chromosome order.
pub fn write_sequences(path: &Path, genome: &SyntheticGenome) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create references output: {:?}", path))?;
    let mut writer = BufWriter::new(file);

    for chromosome in genome.chromosomes() {
        writeln!(writer, ">{}", chromosome.name())?;
        writeln!(writer, "{}", chromosome.sequence())?;
    }

    Ok(())
}

/// Write pre-formatted variant lines, one per line.
pub fn write_variants(path: &Path, lines: &[String]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create variants output: {:?}", path))?;
    let mut writer = BufWriter::new(file);

    for line in lines {
        writeln!(writer, "{}", line)?;
    }

    Ok(())
}
