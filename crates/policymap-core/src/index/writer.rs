//! Chunk tables on disk
//!
//! One CSV per source with header `Type,ID,Text`, rows in chunk order.

use super::chunker::{estimate_word_count, raw_lines, Chunk, SlidingWindowChunker};
use crate::error::{PolicyMapError, Result};
use crate::providers::scan_files;
use std::fs;
use std::path::{Path, PathBuf};

/// Column names of a chunk table
pub const CHUNK_COLUMNS: [&str; 3] = ["Type", "ID", "Text"];

/// Per-source outcome of [`chunk_directory`]
#[derive(Debug, Clone)]
pub struct SourceStats {
    pub source_id: String,
    pub chunks: usize,
    pub approx_tokens: usize,
    pub words: usize,
    pub output: PathBuf,
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write chunks to `path`, returning how many rows were written
///
/// The header is written even when there are no chunks.
pub fn write_chunks<I>(path: &Path, chunks: I) -> Result<usize>
where
    I: IntoIterator<Item = Chunk>,
{
    ensure_parent(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(CHUNK_COLUMNS)?;

    let mut count = 0;
    for chunk in chunks {
        writer.serialize(&chunk)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Read a chunk table back in row order
pub fn read_chunks(path: &Path) -> Result<Vec<Chunk>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    if headers.iter().collect::<Vec<_>>() != CHUNK_COLUMNS {
        return Err(PolicyMapError::Parse(format!(
            "{} is not a chunk table (header: {:?})",
            path.display(),
            headers
        )));
    }

    let mut chunks = Vec::new();
    for record in reader.deserialize() {
        chunks.push(record?);
    }
    Ok(chunks)
}

/// Chunk every `.txt` file of `txt_dir` into `<stem>.csv` under `chunk_dir`
pub fn chunk_directory(
    txt_dir: &Path,
    chunk_dir: &Path,
    chunker: &SlidingWindowChunker,
) -> Result<Vec<SourceStats>> {
    if !txt_dir.is_dir() {
        return Err(PolicyMapError::InvalidInput(format!(
            "Text directory does not exist: {}",
            txt_dir.display()
        )));
    }

    let config = chunker.config();
    let mut stats = Vec::new();

    for path in scan_files(txt_dir, "*.txt", false)? {
        let source_id = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        tracing::info!("----------- -----------");
        tracing::info!("Parsing {} ...", path.display());

        let bytes = fs::read(&path)?;
        let text = String::from_utf8_lossy(&bytes);
        let words = estimate_word_count(&text);

        let output = chunk_dir.join(format!("{}.csv", source_id));
        let chunks = write_chunks(&output, chunker.chunks(&source_id, raw_lines(&text)))?;
        let approx_tokens = chunks * (config.length - config.overlap);

        tracing::info!(
            "{} processed into {} chunks of {} tokens.",
            source_id,
            chunks,
            config.length
        );
        tracing::info!("Approximate token count = {}.", approx_tokens);
        tracing::info!("Approximate word count = {}.", words);
        tracing::info!("Saved: {}.", output.display());

        stats.push(SourceStats {
            source_id,
            chunks,
            approx_tokens,
            words,
            output,
        });
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn chunk(id: u32, text: &str) -> Chunk {
        Chunk {
            source_id: "guide".to_string(),
            sequence: id,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_write_then_read_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("guide.csv");
        let chunks = vec![chunk(1, "data, privacy \"rules\""), chunk(2, "second window")];

        assert_eq!(write_chunks(&path, chunks.clone()).unwrap(), 2);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Type,ID,Text\n"));
        assert_eq!(read_chunks(&path).unwrap(), chunks);
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        assert_eq!(write_chunks(&path, Vec::new()).unwrap(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "Type,ID,Text\n");
        assert!(read_chunks(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_rejects_foreign_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("other.csv");
        fs::write(&path, "item,count\ndata,3\n").unwrap();
        assert!(matches!(read_chunks(&path), Err(PolicyMapError::Parse(_))));
    }

    #[test]
    fn test_chunk_directory_writes_one_table_per_source() {
        let dir = TempDir::new().unwrap();
        let txt = dir.path().join("txt");
        let out = dir.path().join("chunk");
        fs::create_dir_all(&txt).unwrap();
        fs::write(
            txt.join("b_policy.txt"),
            "Faculty may use approved tools.\nab 1\n",
        )
        .unwrap();
        fs::write(txt.join("a_guide.txt"), "12 34\n\n").unwrap();
        fs::write(txt.join("notes.md"), "ignored").unwrap();

        let stats = chunk_directory(&txt, &out, &SlidingWindowChunker::default()).unwrap();
        let ids: Vec<&str> = stats.iter().map(|s| s.source_id.as_str()).collect();
        assert_eq!(ids, vec!["a_guide", "b_policy"]);
        assert_eq!(stats[0].chunks, 0);
        assert_eq!(stats[1].chunks, 1);

        let rows = read_chunks(&out.join("b_policy.csv")).unwrap();
        assert_eq!(rows[0].text, "faculty may use approved tools.");
        assert_eq!(rows[0].source_id, "b_policy");
    }

    #[test]
    fn test_chunk_directory_missing_input() {
        let dir = TempDir::new().unwrap();
        let result = chunk_directory(
            &dir.path().join("missing"),
            dir.path(),
            &SlidingWindowChunker::default(),
        );
        assert!(matches!(result, Err(PolicyMapError::InvalidInput(_))));
    }
}
