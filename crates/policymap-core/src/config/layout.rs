//! On-disk layout of pipeline artifacts

use std::path::{Path, PathBuf};

/// Paths of every stage's inputs and outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub pdf_dir: PathBuf,
    pub txt_dir: PathBuf,
    pub chunk_dir: PathBuf,
    pub combined_chunks: PathBuf,
    pub keyword_table: PathBuf,
    pub embedding_table: PathBuf,
    pub results_dir: PathBuf,
}

impl Layout {
    pub fn new(data_dir: &Path, output_dir: &Path) -> Self {
        let chunk_dir = data_dir.join("chunk");
        Self {
            pdf_dir: data_dir.join("pdf"),
            txt_dir: data_dir.join("txt"),
            combined_chunks: chunk_dir.join("combined.csv"),
            chunk_dir,
            keyword_table: data_dir.join("keyword.csv"),
            embedding_table: data_dir.join("keyword_embed.csv"),
            results_dir: output_dir.join("res"),
        }
    }

    /// Keyword frequency table written by the tagging stage
    pub fn keyword_counts(&self) -> PathBuf {
        self.results_dir.join("keyword_counts.csv")
    }
}
