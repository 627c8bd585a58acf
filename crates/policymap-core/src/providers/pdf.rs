//! PDF to plain-text conversion

use super::scan_files;
use crate::error::{PolicyMapError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const PREVIEW_CHARS: usize = 100;

/// Outcome of [`PdfExtractor::extract_directory`]
#[derive(Debug, Clone, Default)]
pub struct ExtractStats {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Extracts text from PDF files with `pdf-extract`
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract text from a PDF file
    pub fn extract_text(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| {
            PolicyMapError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read PDF file {:?}: {}", path, e),
            ))
        })?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            PolicyMapError::Parse(format!("Failed to extract text from PDF {:?}: {}", path, e))
        })?;

        if text.trim().is_empty() {
            return Err(PolicyMapError::Parse(format!(
                "PDF file {:?} contains no extractable text (may be image-based)",
                path
            )));
        }

        Ok(text)
    }

    /// Convert every PDF in `pdf_dir` to `<stem>.txt` in `txt_dir`
    ///
    /// Files that fail to extract are logged and skipped.
    pub fn extract_directory(&self, pdf_dir: &Path, txt_dir: &Path) -> Result<ExtractStats> {
        if !pdf_dir.is_dir() {
            return Err(PolicyMapError::InvalidInput(format!(
                "PDF directory does not exist: {}",
                pdf_dir.display()
            )));
        }
        fs::create_dir_all(txt_dir)?;

        let mut stats = ExtractStats::default();
        for pdf_path in scan_files(pdf_dir, "*", false)? {
            let is_pdf = pdf_path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false);
            if !is_pdf {
                continue;
            }

            tracing::info!("----------- -----------");
            tracing::info!("Parsing {} ...", pdf_path.display());

            match self.extract_text(&pdf_path) {
                Ok(text) => {
                    tracing::info!("Preview: {} ...", preview(&text));
                    let stem = pdf_path
                        .file_stem()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_default();
                    let out_path = txt_dir.join(format!("{}.txt", stem));
                    fs::write(&out_path, text)?;
                    tracing::info!("Wrote: {}.", out_path.display());
                    stats.written.push(out_path);
                }
                Err(e) => {
                    tracing::warn!("Skipping PDF {:?}: {}", pdf_path, e);
                    stats.skipped.push(pdf_path);
                }
            }
        }

        Ok(stats)
    }
}

/// First characters of `text` on one line
fn preview(text: &str) -> String {
    text.chars()
        .take(PREVIEW_CHARS)
        .collect::<String>()
        .replace('\n', " ")
        .trim()
        .to_string()
}
