//! Keyword frequency tables

use crate::error::Result;
use crate::index::ensure_parent;
use std::collections::HashMap;
use std::path::Path;

/// Occurrence counter over keyword strings
#[derive(Debug, Clone, Default)]
pub struct KeywordCounts {
    counts: HashMap<String, usize>,
}

impl KeywordCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, keyword: &str) {
        *self.counts.entry(keyword.to_string()).or_insert(0) += 1;
    }

    pub fn extend<'a, I: IntoIterator<Item = &'a str>>(&mut self, keywords: I) {
        for kw in keywords {
            self.add(kw);
        }
    }

    pub fn get(&self, keyword: &str) -> usize {
        self.counts.get(keyword).copied().unwrap_or(0)
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Entries by descending count, ties alphabetical
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> =
            self.counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Write an `item,count` table
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["item", "count"])?;
        for (item, count) in self.sorted() {
            writer.write_record([item.to_string(), count.to_string()])?;
        }
        writer.flush()?;
        Ok(())
    }
}
