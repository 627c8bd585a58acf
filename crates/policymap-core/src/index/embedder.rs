//! Resumable keyword embedding
//!
//! Rows are appended to the output table one at a time and flushed
//! immediately, so an interrupted run loses at most the row in flight. On
//! the next run the complete rows already on disk form the resume cursor.

use super::writer::ensure_parent;
use crate::error::{PolicyMapError, Result};
use crate::keywords::{read_tagged, TaggedChunk};
use crate::llm::Embedder;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Leading columns of an embedding table, followed by `dim_0..dim_{p-1}`
pub const EMBED_KEY_COLUMNS: [&str; 3] = ["Type", "ID", "Keywords"];

/// Header of an embedding table with `dimensions` vector columns
pub fn embedding_header(dimensions: usize) -> Vec<String> {
    EMBED_KEY_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain((0..dimensions).map(|i| format!("dim_{}", i)))
        .collect()
}

/// Embedding progress
#[derive(Debug, Clone)]
pub struct EmbedProgress {
    pub total_rows: usize,
    pub processed_rows: usize,
}

/// Embedding statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedStats {
    pub total_rows: usize,
    /// Rows found complete on disk at startup
    pub resumed_rows: usize,
    /// Rows embedded through the remote service in this run
    pub embedded_rows: usize,
    /// Rows with no keywords, written as zero vectors
    pub zero_filled_rows: usize,
}

/// Append-only embedding table on disk
pub struct EmbeddingStore {
    path: PathBuf,
    dimensions: usize,
    keys: Vec<(String, String)>,
    writer: csv::Writer<File>,
}

impl EmbeddingStore {
    /// Open `path`, creating it with a header when absent
    ///
    /// A trailing partial row left by an interrupted write is truncated.
    pub fn open(path: &Path, dimensions: usize) -> Result<Self> {
        let header = embedding_header(dimensions);
        let mut keys = Vec::new();

        let has_content = path.metadata().map(|m| m.len() > 0).unwrap_or(false);
        if has_content {
            let mut reader = csv::ReaderBuilder::new()
                .flexible(true)
                .from_path(path)?;
            let found = reader.headers()?.clone();
            if found.iter().ne(header.iter().map(String::as_str)) {
                return Err(PolicyMapError::Parse(format!(
                    "{} does not have the expected {}-dimension embedding header",
                    path.display(),
                    dimensions
                )));
            }

            let mut complete_end = reader.position().byte();
            let mut record = csv::StringRecord::new();
            while reader.read_record(&mut record)? {
                if record.len() != header.len() {
                    tracing::warn!(
                        "Discarding incomplete row {} of {}",
                        keys.len() + 1,
                        path.display()
                    );
                    break;
                }
                keys.push((record[0].to_string(), record[1].to_string()));
                complete_end = reader.position().byte();
            }
            drop(reader);

            let file = OpenOptions::new().write(true).open(path)?;
            if file.metadata()?.len() > complete_end {
                file.set_len(complete_end)?;
            }
        } else {
            ensure_parent(path)?;
            let mut writer = csv::Writer::from_path(path)?;
            writer.write_record(&header)?;
            writer.flush()?;
        }

        let file = OpenOptions::new().append(true).open(path)?;
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        Ok(Self {
            path: path.to_path_buf(),
            dimensions,
            keys,
            writer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of complete rows persisted so far
    pub fn persisted(&self) -> usize {
        self.keys.len()
    }

    /// Check that persisted rows line up with the first rows of `rows`
    pub fn verify_prefix(&self, rows: &[TaggedChunk]) -> Result<()> {
        if self.keys.len() > rows.len() {
            return Err(PolicyMapError::InvalidInput(format!(
                "{} holds {} rows but the input has only {}",
                self.path.display(),
                self.keys.len(),
                rows.len()
            )));
        }
        for (i, ((ty, id), row)) in self.keys.iter().zip(rows).enumerate() {
            if *ty != row.source_id || *id != row.sequence.to_string() {
                return Err(PolicyMapError::Parse(format!(
                    "Row {} of {} is ({}, {}) but the input has ({}, {})",
                    i + 1,
                    self.path.display(),
                    ty,
                    id,
                    row.source_id,
                    row.sequence
                )));
            }
        }
        Ok(())
    }

    /// Append one row and flush it to disk
    pub fn append(&mut self, row: &TaggedChunk, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(PolicyMapError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }

        let id = row.sequence.to_string();
        let mut record = Vec::with_capacity(EMBED_KEY_COLUMNS.len() + vector.len());
        record.push(row.source_id.clone());
        record.push(id.clone());
        record.push(row.keywords.clone());
        record.extend(vector.iter().map(|v| v.to_string()));

        self.writer.write_record(&record)?;
        self.writer.flush()?;
        self.keys.push((row.source_id.clone(), id));
        Ok(())
    }
}

/// Embed the `Keywords` column of the tagged table at `input` into `output`
///
/// Rows already complete in `output` are skipped. Rows without keywords get
/// a zero vector and no remote call.
pub fn embed_table(
    input: &Path,
    output: &Path,
    embedder: &dyn Embedder,
    progress: Option<Box<dyn Fn(EmbedProgress) + Send + Sync>>,
) -> Result<EmbedStats> {
    let rows = read_tagged(input)?;
    let dimensions = embedder.dimensions();
    tracing::info!("Loaded: {} ({} rows).", input.display(), rows.len());

    let mut store = EmbeddingStore::open(output, dimensions)?;
    store.verify_prefix(&rows)?;

    let mut stats = EmbedStats {
        total_rows: rows.len(),
        resumed_rows: store.persisted(),
        ..Default::default()
    };
    if stats.resumed_rows > 0 {
        tracing::info!(
            "Resuming {} after {} of {} rows",
            output.display(),
            stats.resumed_rows,
            stats.total_rows
        );
    }

    let zeros = vec![0.0f32; dimensions];
    for (i, row) in rows.iter().enumerate().skip(stats.resumed_rows) {
        if row.keywords.trim().is_empty() {
            store.append(row, &zeros)?;
            stats.zero_filled_rows += 1;
        } else {
            let vector = embedder.embed(&row.keywords)?;
            store.append(row, &vector)?;
            stats.embedded_rows += 1;
        }

        if let Some(ref cb) = progress {
            cb(EmbedProgress {
                total_rows: stats.total_rows,
                processed_rows: i + 1,
            });
        }
    }

    tracing::info!(
        "Saved: {} ({} embedded, {} zero-filled, {} resumed).",
        output.display(),
        stats.embedded_rows,
        stats.zero_filled_rows,
        stats.resumed_rows
    );
    Ok(stats)
}
