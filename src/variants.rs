use anyhow::Result;
use rand::prelude::*;

use crate::consts;
use crate::errors::SubsampleError;
use crate::subsample::{random_seq, SubsampleParams, SyntheticGenome};

/// Base at a 1-based position of an ASCII nucleotide sequence.
fn base_at(sequence: &str, pos: u64) -> char {
    sequence.as_bytes()[pos as usize - 1] as char
}

/// Generate the full variant output: metadata header block, then all SNVs,
/// all short indels, all structural placeholder records.
///
/// Positions and reference bases are drawn against the finished synthetic
/// sequences only, so every record stays within its contig.
pub fn synthesize_variants(
    genome: &SyntheticGenome,
    params: &SubsampleParams,
    rng: &mut StdRng,
) -> Result<Vec<String>> {
    let mut lines = vec!["##fileformat=VCFv4.3".to_string()];
    for chromosome in genome.chromosomes() {
        lines.push(format!(
            "##contig=<ID={},length={}>",
            chromosome.name(),
            chromosome.len()
        ));
    }
    lines.push(
        "##INFO=<ID=SVLEN,Number=1,Type=Integer,Description=\"Difference in length between REF and ALT alleles\">"
            .to_string(),
    );
    lines.push("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO".to_string());

    // The structural pass below reuses whatever chromosome the SNV/indel
    // passes drew last instead of drawing its own.
    let mut last_drawn: Option<usize> = None;

    for _ in 0..params.nb_snv {
        let index = rng.gen_range(0..genome.len());
        last_drawn = Some(index);
        let chromosome = &genome.chromosomes()[index];

        let pos = rng.gen_range(1..=chromosome.len());
        let reference = base_at(chromosome.sequence(), pos);
        let alternates: Vec<char> = "actg"
            .chars()
            .filter(|nuc| !nuc.eq_ignore_ascii_case(&reference))
            .collect();
        let alt = *alternates.choose(rng).expect("at least one alternate base");

        lines.push(format!(
            "{}\t{}\t.\t{}\t{}\t99\tPASS\t.",
            chromosome.name(),
            pos,
            reference,
            alt
        ));
    }

    let (indel_min, indel_max) = params.indel_len_range;
    for _ in 0..params.nb_indel {
        let index = rng.gen_range(0..genome.len());
        last_drawn = Some(index);
        let chromosome = &genome.chromosomes()[index];

        let pos = rng.gen_range(1..=chromosome.len());
        let length = rng.gen_range(indel_min..=indel_max);

        let (reference, alt) = if rng.gen_bool(0.5) {
            let anchor = base_at(chromosome.sequence(), pos);
            let alt = format!("{}{}", anchor, random_seq(rng, length as usize));
            (anchor.to_string(), alt)
        } else {
            // Deletion anchored on the base at `pos`: REF carries the anchor
            // plus the deleted span, clamped at the contig end.
            let sequence = chromosome.sequence();
            let end = ((pos + length) as usize).min(sequence.len());
            let reference = sequence[pos as usize - 1..end].to_string();
            (reference, base_at(sequence, pos).to_string())
        };

        lines.push(format!(
            "{}\t{}\t.\t{}\t{}\t99\tPASS\t.",
            chromosome.name(),
            pos,
            reference,
            alt
        ));
    }

    let (struct_min, struct_max) = params.struct_len_range;
    for _ in 0..params.nb_struct {
        let sv_type = consts::STRUCT_TYPES
            .choose(rng)
            .expect("non-empty structural type list");
        let index = last_drawn.ok_or(SubsampleError::NoChromosomeDrawn)?;
        let chromosome = &genome.chromosomes()[index];

        let pos = rng.gen_range(1..=chromosome.len());
        let reference = base_at(chromosome.sequence(), pos);
        let length = rng.gen_range(struct_min..=struct_max);

        lines.push(format!(
            "{}\t{}\t.\t{}\t<{}>\t99\tPASS\tSVLEN={}",
            chromosome.name(),
            pos,
            reference,
            sv_type,
            length
        ));
    }

    Ok(lines)
}
