//! Stack per-source chunk tables into one table

use super::writer::ensure_parent;
use crate::error::{PolicyMapError, Result};
use crate::providers::scan_files;
use std::path::{Path, PathBuf};

/// Outcome of a concatenation
#[derive(Debug, Clone)]
pub struct ConcatStats {
    pub files: Vec<PathBuf>,
    pub rows: usize,
}

/// Append the rows of `inputs`, in order, into `output`
///
/// All inputs must share the header of the first one.
pub fn concat_tables(inputs: &[PathBuf], output: &Path) -> Result<usize> {
    let (first, _) = inputs.split_first().ok_or_else(|| {
        PolicyMapError::InvalidInput("No CSV files given to concatenate".to_string())
    })?;

    let header = csv::Reader::from_path(first)?.headers()?.clone();

    ensure_parent(output)?;
    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record(&header)?;

    let mut rows = 0;
    for path in inputs {
        let mut reader = csv::Reader::from_path(path)?;
        if reader.headers()? != &header {
            return Err(PolicyMapError::Parse(format!(
                "{} has header {:?}, expected {:?}",
                path.display(),
                reader.headers()?,
                header
            )));
        }
        for record in reader.records() {
            writer.write_record(&record?)?;
            rows += 1;
        }
    }
    writer.flush()?;
    Ok(rows)
}

/// Absolute form of `path` with its parent directory resolved
///
/// The file itself need not exist yet.
fn resolve(path: &Path) -> Option<PathBuf> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    Some(parent.canonicalize().ok()?.join(path.file_name()?))
}

/// Combine every `*.csv` in `chunk_dir` (except `output`) into `output`
pub fn concat_directory(chunk_dir: &Path, output: &Path) -> Result<ConcatStats> {
    let output_resolved = resolve(output);

    let files: Vec<PathBuf> = scan_files(chunk_dir, "*.csv", false)?
        .into_iter()
        .filter(|p| output_resolved.is_none() || resolve(p) != output_resolved)
        .collect();

    if files.is_empty() {
        return Err(PolicyMapError::InvalidInput(format!(
            "No CSV files found in {}",
            chunk_dir.display()
        )));
    }

    let rows = concat_tables(&files, output)?;
    tracing::info!("Combined {} files -> {}", files.len(), output.display());
    tracing::info!("Total rows: {}", rows);

    Ok(ConcatStats { files, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_concat_directory_skips_previous_output() {
        let dir = TempDir::new().unwrap();
        let chunk_dir = dir.path().to_path_buf();
        fs::write(chunk_dir.join("b.csv"), "Type,ID,Text\nb,1,beta words\n").unwrap();
        fs::write(
            chunk_dir.join("a.csv"),
            "Type,ID,Text\na,1,alpha words\na,2,more alpha\n",
        )
        .unwrap();
        let output = chunk_dir.join("combined.csv");
        fs::write(&output, "Type,ID,Text\nstale,1,old\n").unwrap();

        let stats = concat_directory(&chunk_dir, &output).unwrap();
        assert_eq!(stats.files.len(), 2);
        assert_eq!(stats.rows, 3);

        let combined = fs::read_to_string(&output).unwrap();
        assert_eq!(
            combined,
            "Type,ID,Text\na,1,alpha words\na,2,more alpha\nb,1,beta words\n"
        );
    }

    #[test]
    fn test_concat_directory_skips_output_spelled_differently() {
        let dir = TempDir::new().unwrap();
        let chunk_dir = dir.path().join("chunk");
        fs::create_dir_all(&chunk_dir).unwrap();
        fs::write(chunk_dir.join("a.csv"), "Type,ID,Text\na,1,alpha words\n").unwrap();
        fs::write(chunk_dir.join("combined.csv"), "Type,ID,Text\nstale,1,old\n").unwrap();

        let output = dir.path().join("chunk").join("..").join("chunk").join("combined.csv");
        let listed = dir.path().join(".").join("chunk");
        let stats = concat_directory(&listed, &output).unwrap();

        assert_eq!(stats.files.len(), 1);
        assert_eq!(stats.rows, 1);
        assert_eq!(
            fs::read_to_string(chunk_dir.join("combined.csv")).unwrap(),
            "Type,ID,Text\na,1,alpha words\n"
        );
    }

    #[test]
    fn test_concat_empty_directory_errors() {
        let dir = TempDir::new().unwrap();
        let result = concat_directory(dir.path(), &dir.path().join("combined.csv"));
        assert!(matches!(result, Err(PolicyMapError::InvalidInput(_))));
    }

    #[test]
    fn test_concat_header_mismatch() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.csv"), "Type,ID,Text\na,1,x\n").unwrap();
        fs::write(dir.path().join("b.csv"), "item,count\nx,1\n").unwrap();
        let result = concat_directory(dir.path(), &dir.path().join("out").join("all.csv"));
        assert!(matches!(result, Err(PolicyMapError::Parse(_))));
    }
}
