//! Controlled-vocabulary keyword tagging
//!
//! Each chunk is tagged with the vocabulary entries that appear among its
//! space-separated tokens. Tokens come either from the chunk text itself or
//! from a companion file holding one pre-lemmatized line per chunk.

mod vocabulary;

pub use vocabulary::DEFAULT_VOCABULARY;

use crate::analysis::KeywordCounts;
use crate::error::{PolicyMapError, Result};
use crate::index::{ensure_parent, read_chunks};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Separator between keywords in the `Keywords` column
pub const KEYWORD_SEPARATOR: &str = ", ";

/// Column names of a tagged table
pub const TAGGED_COLUMNS: [&str; 4] = ["Type", "ID", "Text", "Keywords"];

const LOG_EVERY: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Keywords, matched in this order
    pub vocabulary: Vec<String>,

    /// One lemmatized line per chunk, aligned with the combined chunk table
    pub lemma_file: Option<PathBuf>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            vocabulary: DEFAULT_VOCABULARY.iter().map(|s| s.to_string()).collect(),
            lemma_file: None,
        }
    }
}

/// A chunk row with its keyword tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedChunk {
    #[serde(rename = "Type")]
    pub source_id: String,

    #[serde(rename = "ID")]
    pub sequence: u32,

    #[serde(rename = "Text")]
    pub text: String,

    #[serde(rename = "Keywords")]
    pub keywords: String,
}

impl TaggedChunk {
    pub fn keyword_list(&self) -> Vec<&str> {
        split_keywords(&self.keywords)
    }
}

/// Split a `Keywords` cell into trimmed, non-empty keywords
pub fn split_keywords(cell: &str) -> Vec<&str> {
    cell.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .collect()
}

/// Matches text against a fixed vocabulary
#[derive(Debug, Clone)]
pub struct KeywordTagger {
    vocabulary: Vec<String>,
}

impl KeywordTagger {
    /// Build a tagger; duplicate entries are dropped, first occurrence wins
    pub fn new<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let vocabulary = vocabulary
            .into_iter()
            .map(Into::into)
            .filter(|kw: &String| !kw.is_empty() && seen.insert(kw.clone()))
            .collect();
        Self { vocabulary }
    }

    pub fn from_config(config: &KeywordConfig) -> Self {
        Self::new(config.vocabulary.iter().cloned())
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Vocabulary entries present as whole tokens of `text`
    pub fn tag(&self, text: &str) -> Vec<&str> {
        let tokens: HashSet<&str> = text.split(' ').collect();
        self.vocabulary
            .iter()
            .map(String::as_str)
            .filter(|kw| tokens.contains(kw))
            .collect()
    }
}

/// Outcome of [`tag_table`]
#[derive(Debug, Clone, Default)]
pub struct TagReport {
    pub rows: usize,
    pub tagged_rows: usize,
    pub counts: KeywordCounts,
}

/// Read a lemma file, one entry per line
pub fn read_lemmas(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Tag every row of the chunk table at `chunks_csv` and write `output`
pub fn tag_table(
    tagger: &KeywordTagger,
    chunks_csv: &Path,
    lemma_file: Option<&Path>,
    output: &Path,
) -> Result<TagReport> {
    let chunks = read_chunks(chunks_csv)?;
    tracing::info!("Loaded: {} ({} rows).", chunks_csv.display(), chunks.len());

    let lemmas = match lemma_file {
        Some(path) => {
            let lemmas = read_lemmas(path)?;
            tracing::info!("Loaded: {} ({} rows).", path.display(), lemmas.len());
            if lemmas.len() != chunks.len() {
                tracing::error!("Loaded sets have different N.");
                return Err(PolicyMapError::InvalidInput(format!(
                    "{} has {} rows but {} has {} rows",
                    path.display(),
                    lemmas.len(),
                    chunks_csv.display(),
                    chunks.len()
                )));
            }
            Some(lemmas)
        }
        None => None,
    };

    ensure_parent(output)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output)?;
    writer.write_record(TAGGED_COLUMNS)?;

    let mut report = TagReport {
        rows: chunks.len(),
        ..Default::default()
    };

    for (i, chunk) in chunks.into_iter().enumerate() {
        let source = match &lemmas {
            Some(lemmas) => lemmas[i].as_str(),
            None => chunk.text.as_str(),
        };
        let found = tagger.tag(source);
        if !found.is_empty() {
            report.tagged_rows += 1;
        }
        report.counts.extend(found.iter().copied());

        let row = TaggedChunk {
            keywords: found.join(KEYWORD_SEPARATOR),
            source_id: chunk.source_id,
            sequence: chunk.sequence,
            text: chunk.text,
        };

        if (i + 1) % LOG_EVERY == 0 {
            tracing::info!("----------- -----------");
            tracing::info!("Row: {}/{}", i + 1, report.rows);
            tracing::info!("Chunk text: {}", row.text);
            tracing::info!("Chunk topics: {}", row.keywords);
        }

        writer.serialize(&row)?;
    }
    writer.flush()?;

    tracing::info!(
        "Saved: {} ({} of {} rows tagged).",
        output.display(),
        report.tagged_rows,
        report.rows
    );
    Ok(report)
}

/// Read a tagged table in row order
pub fn read_tagged(path: &Path) -> Result<Vec<TaggedChunk>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{write_chunks, Chunk};
    use tempfile::TempDir;

    fn chunk(id: u32, text: &str) -> Chunk {
        Chunk {
            source_id: "privacy".to_string(),
            sequence: id,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_tag_matches_whole_tokens_in_vocabulary_order() {
        let tagger = KeywordTagger::new(["zoom", "data", "privacy", "it"]);
        let tags = tagger.tag("privacy of data shared over zoom with itself");
        assert_eq!(tags, vec!["zoom", "data", "privacy"]);
    }

    #[test]
    fn test_tagger_dedupes_vocabulary() {
        let tagger = KeywordTagger::new(["data", "tool", "data", ""]);
        assert_eq!(tagger.vocabulary(), &["data".to_string(), "tool".to_string()]);
    }

    #[test]
    fn test_default_vocabulary_loaded() {
        let tagger = KeywordTagger::from_config(&KeywordConfig::default());
        assert_eq!(tagger.vocabulary().len(), DEFAULT_VOCABULARY.len());
        assert_eq!(tagger.tag("student privacy policy"), vec!["policy", "privacy", "student"]);
    }

    #[test]
    fn test_split_keywords() {
        assert_eq!(split_keywords("data, policy,  risk"), vec!["data", "policy", "risk"]);
        assert!(split_keywords("").is_empty());
    }

    #[test]
    fn test_tag_table_uses_chunk_text() {
        let dir = TempDir::new().unwrap();
        let chunks_csv = dir.path().join("combined.csv");
        write_chunks(
            &chunks_csv,
            vec![chunk(1, "encryption protects data"), chunk(2, "nothing here")],
        )
        .unwrap();

        let tagger = KeywordTagger::new(["data", "encryption"]);
        let output = dir.path().join("keyword.csv");
        let report = tag_table(&tagger, &chunks_csv, None, &output).unwrap();

        assert_eq!(report.rows, 2);
        assert_eq!(report.tagged_rows, 1);
        assert_eq!(report.counts.get("data"), 1);

        let rows = read_tagged(&output).unwrap();
        assert_eq!(rows[0].keywords, "data, encryption");
        assert_eq!(rows[1].keywords, "");
        assert_eq!(rows[1].sequence, 2);
    }

    #[test]
    fn test_tag_table_prefers_lemmas() {
        let dir = TempDir::new().unwrap();
        let chunks_csv = dir.path().join("combined.csv");
        write_chunks(&chunks_csv, vec![chunk(1, "students were evaluated")]).unwrap();
        let lemmas = dir.path().join("lemmas.txt");
        std::fs::write(&lemmas, "student be evaluate\n").unwrap();

        let tagger = KeywordTagger::new(["evaluate", "student"]);
        let output = dir.path().join("keyword.csv");
        tag_table(&tagger, &chunks_csv, Some(&lemmas), &output).unwrap();

        let rows = read_tagged(&output).unwrap();
        assert_eq!(rows[0].keyword_list(), vec!["evaluate", "student"]);
        assert_eq!(rows[0].text, "students were evaluated");
    }

    #[test]
    fn test_tag_table_rejects_misaligned_lemmas() {
        let dir = TempDir::new().unwrap();
        let chunks_csv = dir.path().join("combined.csv");
        write_chunks(&chunks_csv, vec![chunk(1, "a b"), chunk(2, "c d")]).unwrap();
        let lemmas = dir.path().join("lemmas.txt");
        std::fs::write(&lemmas, "only one line\n").unwrap();

        let result = tag_table(
            &KeywordTagger::new(["data"]),
            &chunks_csv,
            Some(&lemmas),
            &dir.path().join("keyword.csv"),
        );
        assert!(matches!(result, Err(PolicyMapError::InvalidInput(_))));
    }
}
