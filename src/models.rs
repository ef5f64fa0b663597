use std::collections::HashMap;
use std::io::BufRead;

use anyhow::{Context, Result};
use regex::Regex;

use crate::errors::SubsampleError;

// ============================================================================
// Annotation Record
// ============================================================================

/// One nine-column tab-delimited annotation record.
///
/// Coordinates are 1-based and inclusive on both ends. The attributes column
/// keeps its raw `key=value;...` form; `ID` and `Parent` are extracted by the
/// index builder, not stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct GffRecord {
    pub seqname: String,
    pub source: String,
    pub feature: String,
    pub start: u64,
    pub end: u64,
    pub score: String,
    pub strand: String,
    pub frame: String,
    pub attributes: String,
}

impl GffRecord {
    /// Parse a tab-delimited line into a record.
    ///
    /// Returns `None` for lines with fewer than nine fields.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 9 {
            return Ok(None);
        }

        let start = fields[3]
            .parse::<u64>()
            .with_context(|| format!("Invalid start coordinate: {}", fields[3]))?;
        let end = fields[4]
            .parse::<u64>()
            .with_context(|| format!("Invalid end coordinate: {}", fields[4]))?;

        Ok(Some(GffRecord {
            seqname: fields[0].to_string(),
            source: fields[1].to_string(),
            feature: fields[2].to_string(),
            start,
            end,
            score: fields[5].to_string(),
            strand: fields[6].to_string(),
            frame: fields[7].to_string(),
            attributes: fields[8].to_string(),
        }))
    }

    /// Serialize back to a tab-delimited line.
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.seqname,
            self.source,
            self.feature,
            self.start,
            self.end,
            self.score,
            self.strand,
            self.frame,
            self.attributes
        )
    }

    /// Span covered by the record, `end - start`.
    pub fn length(&self) -> u64 {
        self.end - self.start
    }

    /// Copy of this record translated onto another chromosome.
    ///
    /// Both coordinates move by the same signed offset, so the span is
    /// preserved exactly.
    pub fn relocated(&self, chrom: &str, offset: i64) -> GffRecord {
        let mut moved = self.clone();
        moved.seqname = chrom.to_string();
        moved.start = (self.start as i64 + offset) as u64;
        moved.end = (self.end as i64 + offset) as u64;
        moved
    }
}

// ============================================================================
// Annotation Index
// ============================================================================

/// Read-only view over one annotation input.
///
/// Built once by [`AnnotationIndex::from_reader`], then only queried. Records
/// without an `ID` attribute are indexed nowhere. When two records share an
/// ID the later one wins in `id_to_record` while the feature and parent lists
/// keep both entries.
#[derive(Debug, Default)]
pub struct AnnotationIndex {
    id_to_record: HashMap<String, GffRecord>,
    feature_to_ids: HashMap<String, Vec<String>>,
    parent_to_children: HashMap<String, Vec<String>>,
}

impl AnnotationIndex {
    /// Build the index from a decompressed annotation stream.
    ///
    /// Lines starting with `#`, blank lines and lines with fewer than nine
    /// fields are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let id_regex = Regex::new(r"ID=([^;]+)").expect("valid ID pattern");
        let parent_regex = Regex::new(r"Parent=([^;]+)").expect("valid Parent pattern");

        let mut index = AnnotationIndex::default();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read annotation line {}", line_num + 1))?;
            if line.starts_with('#') || line.is_empty() {
                continue;
            }

            let record = match GffRecord::parse(&line)
                .with_context(|| format!("Malformed annotation line {}", line_num + 1))?
            {
                Some(record) => record,
                None => continue,
            };

            let id = match id_regex.captures(&record.attributes) {
                Some(captures) => captures[1].to_string(),
                None => continue,
            };

            index
                .feature_to_ids
                .entry(record.feature.clone())
                .or_default()
                .push(id.clone());

            if let Some(captures) = parent_regex.captures(&record.attributes) {
                index
                    .parent_to_children
                    .entry(captures[1].to_string())
                    .or_default()
                    .push(id.clone());
            }

            index.id_to_record.insert(id, record);
        }

        Ok(index)
    }

    /// Record registered under `id`, if any.
    pub fn record(&self, id: &str) -> Option<&GffRecord> {
        self.id_to_record.get(id)
    }

    /// IDs of every record of the given feature type, in input order.
    pub fn ids_of_feature(&self, feature: &str) -> &[String] {
        self.feature_to_ids
            .get(feature)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Direct children of `id`, in input order.
    pub fn children(&self, id: &str) -> &[String] {
        self.parent_to_children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.id_to_record.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_record.is_empty()
    }
}

// ============================================================================
// Sequence Index
// ============================================================================

/// Chromosome name to full nucleotide sequence, case preserved.
#[derive(Debug, Default)]
pub struct SequenceIndex {
    sequences: HashMap<String, String>,
}

impl SequenceIndex {
    /// Build the index from a decompressed FASTA stream.
    ///
    /// The name of a sequence is the first whitespace-delimited token of its
    /// header, `>` stripped. Sequence lines are concatenated as-is under the
    /// most recent header. A sequence line before any header is an error.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut sequences: HashMap<String, String> = HashMap::new();
        let mut current: Option<String> = None;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read sequence line {}", line_num + 1))?;
            let trimmed = line.trim();

            if trimmed.starts_with('>') {
                let name = trimmed
                    .split_whitespace()
                    .next()
                    .expect("header line has at least the marker token")[1..]
                    .to_string();
                sequences.entry(name.clone()).or_default();
                current = Some(name);
            } else if !trimmed.is_empty() {
                let name = current.as_ref().ok_or(SubsampleError::MissingFastaHeader)?;
                sequences
                    .get_mut(name)
                    .expect("current name was registered on its header line")
                    .push_str(trimmed);
            }
        }

        Ok(SequenceIndex { sequences })
    }

    /// Full sequence of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.sequences.get(name).map(String::as_str)
    }

    /// Number of sequences in the index.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}
