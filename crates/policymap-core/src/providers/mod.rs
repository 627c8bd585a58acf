//! Input discovery and document text extraction

pub mod pdf;

pub use pdf::{ExtractStats, PdfExtractor};

use crate::error::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files under `base_path` whose relative path matches `pattern`, sorted
///
/// Hidden entries are skipped. With `recursive == false` only direct
/// children are considered.
pub fn scan_files(base_path: &Path, pattern: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let glob_pattern = glob::Pattern::new(pattern)?;
    let mut walker = WalkDir::new(base_path).follow_links(true).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if let Ok(relative) = path.strip_prefix(base_path) {
            if glob_pattern.matches(&relative.to_string_lossy()) {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    Ok(files)
}
