use std::collections::HashMap;

use anyhow::Result;
use rand::prelude::*;

use crate::consts;
use crate::errors::SubsampleError;
use crate::models::{AnnotationIndex, GffRecord, SequenceIndex};

// ============================================================================
// Parameters
// ============================================================================

/// Tunable knobs for one subsampling run.
///
/// Defaults reproduce the fixture sizes expected by the downstream annotator
/// test-suite; tests shrink them.
#[derive(Debug, Clone)]
pub struct SubsampleParams {
    pub nb_genes: usize,
    /// Inclusive range of transcripts requested per selected gene.
    pub transcript_range: (usize, usize),
    pub nb_chromosomes: usize,
    /// Inclusive range of the random gap inserted before each gene.
    pub gene_gap_range: (u64, u64),
    pub nb_snv: usize,
    pub nb_indel: usize,
    /// Inclusive range of inserted/deleted span lengths.
    pub indel_len_range: (u64, u64),
    pub nb_struct: usize,
    /// Inclusive range of structural variant lengths.
    pub struct_len_range: (u64, u64),
}

impl Default for SubsampleParams {
    fn default() -> Self {
        SubsampleParams {
            nb_genes: consts::DEFAULT_NB_GENES,
            transcript_range: consts::DEFAULT_TRANSCRIPT_RANGE,
            nb_chromosomes: consts::DEFAULT_NB_CHROMOSOMES,
            gene_gap_range: consts::DEFAULT_GENE_GAP_RANGE,
            nb_snv: consts::DEFAULT_NB_SNV,
            nb_indel: consts::DEFAULT_NB_INDEL,
            indel_len_range: consts::DEFAULT_INDEL_LEN_RANGE,
            nb_struct: consts::DEFAULT_NB_STRUCT,
            struct_len_range: consts::DEFAULT_STRUCT_LEN_RANGE,
        }
    }
}

// ============================================================================
// Synthetic Genome
// ============================================================================

/// One output chromosome: a forward write cursor plus the sequence built so
/// far from random filler and copied source slices.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticChromosome {
    name: String,
    position: u64,
    sequence: String,
}

impl SyntheticChromosome {
    fn new(name: String) -> Self {
        SyntheticChromosome {
            name,
            position: 1,
            sequence: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current write cursor, 1-based.
    pub fn position(&self) -> u64 {
        self.position
    }

    fn set_position(&mut self, position: u64) {
        self.position = position;
    }

    fn push_seq(&mut self, seq: &str) {
        self.sequence.push_str(seq);
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Length of the accumulated sequence.
    pub fn len(&self) -> u64 {
        self.sequence.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// The fixed set of output chromosomes, named `chrA`, `chrB`, ... in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticGenome {
    chromosomes: Vec<SyntheticChromosome>,
}

impl SyntheticGenome {
    pub fn new(nb_chromosomes: usize) -> Self {
        let chromosomes = (0..nb_chromosomes)
            .map(|index| SyntheticChromosome::new(format!("chr{}", (b'A' + index as u8) as char)))
            .collect();

        SyntheticGenome { chromosomes }
    }

    pub fn chromosomes(&self) -> &[SyntheticChromosome] {
        &self.chromosomes
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    fn chromosome_mut(&mut self, index: usize) -> &mut SyntheticChromosome {
        &mut self.chromosomes[index]
    }

    #[cfg(test)]
    pub(crate) fn with_sequences(sequences: &[(&str, String)]) -> Self {
        let chromosomes = sequences
            .iter()
            .map(|(name, sequence)| SyntheticChromosome {
                name: name.to_string(),
                position: 1,
                sequence: sequence.clone(),
            })
            .collect();

        SyntheticGenome { chromosomes }
    }
}

// ============================================================================
// Selection and relocation
// ============================================================================

/// Everything produced by one selection/relocation pass.
#[derive(Debug)]
pub struct Subsample {
    /// Relocated records in per-gene encounter order: gene, its transcripts,
    /// each transcript's children.
    pub records: Vec<GffRecord>,
    pub genome: SyntheticGenome,
    pub selected_gene_ids: Vec<String>,
}

/// Generate a random lowercase nucleotide sequence of the given length.
pub fn random_seq(rng: &mut StdRng, length: usize) -> String {
    (0..length)
        .map(|_| consts::NUCLEOTIDES[rng.gen_range(0..consts::NUCLEOTIDES.len())] as char)
        .collect()
}

/// Select genes stratified by transcript count and relocate them onto the
/// synthetic chromosomes.
///
/// The generator is the single source of randomness; every draw goes through
/// it in a fixed order, so one seed fully determines the output.
pub fn subsample(
    annotations: &AnnotationIndex,
    sequences: &SequenceIndex,
    params: &SubsampleParams,
    rng: &mut StdRng,
) -> Result<Subsample> {
    // One transcript-count target per gene slot.
    let (count_min, count_max) = params.transcript_range;
    let targets: Vec<usize> = (0..params.nb_genes)
        .map(|_| rng.gen_range(count_min..=count_max))
        .collect();

    // Shuffle once, then partition by realized transcript count. The bucket
    // lists inherit the shuffled order.
    let mut gene_ids: Vec<String> = annotations.ids_of_feature("gene").to_vec();
    gene_ids.shuffle(rng);

    let mut buckets: HashMap<usize, Vec<String>> = HashMap::new();
    for gene_id in gene_ids {
        let nb_transcripts = annotations.children(&gene_id).len();
        buckets.entry(nb_transcripts).or_default().push(gene_id);
    }

    let mut selected_gene_ids = Vec::with_capacity(targets.len());
    for target in targets {
        let gene_id = buckets
            .get(&target)
            .and_then(|bucket| bucket.choose(rng))
            .ok_or(SubsampleError::EmptyTranscriptBucket(target))?;
        selected_gene_ids.push(gene_id.clone());
    }

    let mut genome = SyntheticGenome::new(params.nb_chromosomes);
    let mut records = Vec::new();
    let (gap_min, gap_max) = params.gene_gap_range;

    for gene_id in &selected_gene_ids {
        let gene = annotations
            .record(gene_id)
            .ok_or_else(|| SubsampleError::UnknownFeature(gene_id.clone()))?;

        let chrom_index = rng.gen_range(0..genome.len());
        let gap = rng.gen_range(gap_min..=gap_max);
        let filler = random_seq(rng, gap as usize);

        let chrom_name = genome.chromosomes()[chrom_index].name().to_string();
        let new_start = genome.chromosomes()[chrom_index].position() + gap;
        genome.chromosome_mut(chrom_index).push_seq(&filler);

        // All records of the gene move by the same signed offset.
        let offset = new_start as i64 - gene.start as i64;

        records.push(gene.relocated(&chrom_name, offset));
        for transcript_id in annotations.children(gene_id) {
            let transcript = annotations
                .record(transcript_id)
                .ok_or_else(|| SubsampleError::UnknownFeature(transcript_id.clone()))?;
            records.push(transcript.relocated(&chrom_name, offset));

            for child_id in annotations.children(transcript_id) {
                let child = annotations
                    .record(child_id)
                    .ok_or_else(|| SubsampleError::UnknownFeature(child_id.clone()))?;
                records.push(child.relocated(&chrom_name, offset));
            }
        }

        let source = sequences
            .get(&gene.seqname)
            .ok_or_else(|| SubsampleError::UnknownSequence(gene.seqname.clone()))?;

        // 1-based inclusive span to a byte slice, leniently clamped to the
        // source length.
        let begin = (gene.start.saturating_sub(1) as usize).min(source.len());
        let end = (gene.end as usize).min(source.len());
        genome
            .chromosome_mut(chrom_index)
            .push_seq(&source[begin..end.max(begin)]);

        // The cursor takes the gene's ORIGINAL end coordinate, not the
        // synthetic one. Gap computation for later genes on this chromosome
        // therefore runs in source coordinates.
        genome.chromosome_mut(chrom_index).set_position(gene.end);
    }

    Ok(Subsample {
        records,
        genome,
        selected_gene_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn fixture_annotations() -> AnnotationIndex {
        let mut gff = String::from("##gff-version 3\n");
        // Six genes with 1, 2, 3, 4, 5 and 3 transcripts, one exon each.
        let transcript_counts = [1usize, 2, 3, 4, 5, 3];
        for (g, count) in transcript_counts.iter().enumerate() {
            let start = 100 + (g as u64) * 200;
            let end = start + 99;
            gff.push_str(&format!(
                "chr1\ttest\tgene\t{}\t{}\t.\t+\t.\tID=g{}\n",
                start, end, g
            ));
            for t in 0..*count {
                gff.push_str(&format!(
                    "chr1\ttest\ttranscript\t{}\t{}\t.\t+\t.\tID=g{}t{};Parent=g{}\n",
                    start, end, g, t, g
                ));
                gff.push_str(&format!(
                    "chr1\ttest\texon\t{}\t{}\t.\t+\t.\tID=g{}t{}e0;Parent=g{}t{}\n",
                    start,
                    start + 50,
                    g,
                    t,
                    g,
                    t
                ));
            }
        }

        AnnotationIndex::from_reader(Cursor::new(gff)).unwrap()
    }

    fn fixture_sequences() -> SequenceIndex {
        let fasta = format!(">chr1\n{}\n", "ACGT".repeat(500));
        SequenceIndex::from_reader(Cursor::new(fasta)).unwrap()
    }

    fn test_params() -> SubsampleParams {
        SubsampleParams {
            nb_genes: 6,
            transcript_range: (1, 5),
            nb_chromosomes: 3,
            ..SubsampleParams::default()
        }
    }

    fn extract_id(record: &GffRecord) -> &str {
        record
            .attributes
            .split(';')
            .find_map(|field| field.strip_prefix("ID="))
            .expect("fixture records all carry an ID")
    }

    #[test]
    fn random_seq_uses_lowercase_alphabet() {
        let mut rng = StdRng::seed_from_u64(1);
        let seq = random_seq(&mut rng, 200);

        assert_eq!(seq.len(), 200);
        assert!(seq.chars().all(|nuc| "actg".contains(nuc)));
    }

    #[test]
    fn same_seed_same_output() {
        let annotations = fixture_annotations();
        let sequences = fixture_sequences();
        let params = test_params();

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let first = subsample(&annotations, &sequences, &params, &mut rng_a).unwrap();
        let second = subsample(&annotations, &sequences, &params, &mut rng_b).unwrap();

        assert_eq!(first.records, second.records);
        assert_eq!(first.genome, second.genome);
        assert_eq!(first.selected_gene_ids, second.selected_gene_ids);
    }

    #[test]
    fn relocation_preserves_every_record_length() {
        let annotations = fixture_annotations();
        let sequences = fixture_sequences();
        let mut rng = StdRng::seed_from_u64(42);

        let result = subsample(&annotations, &sequences, &test_params(), &mut rng).unwrap();

        assert!(!result.records.is_empty());
        for record in &result.records {
            let original = annotations.record(extract_id(record)).unwrap();
            assert_eq!(record.length(), original.length());
        }
    }

    #[test]
    fn transcript_count_matches_child_list() {
        let annotations = fixture_annotations();
        let sequences = fixture_sequences();
        let mut rng = StdRng::seed_from_u64(42);

        let result = subsample(&annotations, &sequences, &test_params(), &mut rng).unwrap();

        let mut expected = 0;
        let mut seen = 0;
        for record in &result.records {
            match record.feature.as_str() {
                "gene" => {
                    assert_eq!(seen, expected, "previous gene block incomplete");
                    expected = annotations.children(extract_id(record)).len();
                    seen = 0;
                }
                "transcript" => seen += 1,
                _ => {}
            }
        }
        assert_eq!(seen, expected);
    }

    #[test]
    fn six_gene_scenario_has_no_orphans() {
        let annotations = fixture_annotations();
        let sequences = fixture_sequences();
        let mut rng = StdRng::seed_from_u64(42);
        let params = test_params();

        let result = subsample(&annotations, &sequences, &params, &mut rng).unwrap();

        let gene_lines = result
            .records
            .iter()
            .filter(|record| record.feature == "gene")
            .count();
        assert_eq!(gene_lines, params.nb_genes);

        // Every non-gene record sits on the same chromosome as the gene it
        // descends from.
        let mut current_chrom = None;
        for record in &result.records {
            if record.feature == "gene" {
                current_chrom = Some(record.seqname.clone());
            } else {
                assert_eq!(Some(record.seqname.clone()), current_chrom);
            }
            assert!(["chrA", "chrB", "chrC"].contains(&record.seqname.as_str()));
        }
    }

    #[test]
    fn single_gene_single_chromosome() {
        let gff = "chr1\ttest\tgene\t3\t7\t.\t+\t.\tID=lonely\n";
        let fasta = ">chr1\nACGTACGTAC\n";
        let annotations = AnnotationIndex::from_reader(Cursor::new(gff)).unwrap();
        let sequences = SequenceIndex::from_reader(Cursor::new(fasta)).unwrap();
        let params = SubsampleParams {
            nb_genes: 1,
            transcript_range: (0, 0),
            nb_chromosomes: 1,
            ..SubsampleParams::default()
        };
        let mut rng = StdRng::seed_from_u64(42);

        let result = subsample(&annotations, &sequences, &params, &mut rng).unwrap();

        assert_eq!(result.selected_gene_ids, ["lonely"]);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].feature, "gene");
        assert_eq!(result.records[0].seqname, "chrA");
        assert_eq!(result.records[0].length(), 4);

        // Buffer holds the gap filler plus the five copied source bases.
        let chromosome = &result.genome.chromosomes()[0];
        assert!(chromosome.len() >= params.gene_gap_range.0 + 5);
    }

    #[test]
    fn empty_transcript_bucket_fails_the_run() {
        let annotations = fixture_annotations();
        let sequences = fixture_sequences();
        let params = SubsampleParams {
            nb_genes: 1,
            // No fixture gene has six transcripts.
            transcript_range: (6, 6),
            ..SubsampleParams::default()
        };
        let mut rng = StdRng::seed_from_u64(42);

        let error = subsample(&annotations, &sequences, &params, &mut rng).unwrap_err();
        match error.downcast_ref::<SubsampleError>() {
            Some(SubsampleError::EmptyTranscriptBucket(6)) => {}
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn synthetic_chromosomes_are_named_in_order() {
        let genome = SyntheticGenome::new(3);
        let names: Vec<&str> = genome
            .chromosomes()
            .iter()
            .map(|chromosome| chromosome.name())
            .collect();
        assert_eq!(names, ["chrA", "chrB", "chrC"]);
    }
}
