//! Sliding-window token chunking of extracted document text
//!
//! Lines are filtered and normalized, split into tokens, and the surviving
//! tokens are gathered into overlapping fixed-size windows. Each window
//! becomes one [`Chunk`] numbered from 1 within its source.

use crate::error::{PolicyMapError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Chunking defaults
pub const CHUNK_LENGTH_TOKENS: usize = 64;
pub const CHUNK_OVERLAP_TOKENS: usize = 16;
pub const MIN_TOKEN_LEN: usize = 1;
pub const MAX_TOKEN_LEN: usize = 24;

lazy_static! {
    static ref URL_RE: Regex = Regex::new(r"(?i)https?://\S*(?:\s|$)").unwrap();
}

/// Window and token-filter parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Window size at which a chunk is cut
    pub length: usize,

    /// Tokens carried from the end of one chunk into the next
    pub overlap: usize,

    /// Exclusive lower bound on token character length
    pub min_token_len: usize,

    /// Exclusive upper bound on token character length
    pub max_token_len: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            length: CHUNK_LENGTH_TOKENS,
            overlap: CHUNK_OVERLAP_TOKENS,
            min_token_len: MIN_TOKEN_LEN,
            max_token_len: MAX_TOKEN_LEN,
        }
    }
}

impl ChunkerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 {
            return Err(PolicyMapError::Config(
                "chunking.length must be positive".to_string(),
            ));
        }
        if self.overlap >= self.length {
            return Err(PolicyMapError::Config(format!(
                "chunking.overlap ({}) must be smaller than chunking.length ({})",
                self.overlap, self.length
            )));
        }
        if self.min_token_len >= self.max_token_len {
            return Err(PolicyMapError::Config(format!(
                "chunking.min_token_len ({}) must be smaller than chunking.max_token_len ({})",
                self.min_token_len, self.max_token_len
            )));
        }
        Ok(())
    }

    /// Whether a token of `len` characters lies strictly inside the bounds
    pub fn accepts_len(&self, len: usize) -> bool {
        self.min_token_len < len && len < self.max_token_len
    }
}

/// One window of tokens from a source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    #[serde(rename = "Type")]
    pub source_id: String,

    #[serde(rename = "ID")]
    pub sequence: u32,

    #[serde(rename = "Text")]
    pub text: String,
}

impl Chunk {
    pub fn token_count(&self) -> usize {
        self.text.split(' ').filter(|t| !t.is_empty()).count()
    }
}

/// True when characters outside `[A-Za-z]` make up more than half the line
pub fn is_non_alpha(line: &str) -> bool {
    let total = line.chars().count();
    let non_alpha = line.chars().filter(|c| !c.is_ascii_alphabetic()).count();
    non_alpha * 2 > total
}

/// Lowercase, trim the end, and blank out `http(s)://` links
pub fn normalize_line(line: &str) -> String {
    let lowered = line.trim_end().to_lowercase();
    URL_RE.replace_all(&lowered, " ").into_owned()
}

fn keep_token(token: &str, config: &ChunkerConfig) -> bool {
    !matches!(token, "" | " " | "s")
        && !token.starts_with("www")
        && config.accepts_len(token.chars().count())
}

/// Qualifying tokens of a single raw line, in order
///
/// Blank lines and symbol-heavy lines yield nothing. The symbol check looks
/// at the raw line, before any normalization.
pub fn line_tokens(line: &str, config: &ChunkerConfig) -> Vec<String> {
    if line.trim().is_empty() || is_non_alpha(line) {
        return Vec::new();
    }

    normalize_line(line)
        .split(char::is_whitespace)
        .map(|t| t.replace('\'', ""))
        .filter(|t| keep_token(t, config))
        .collect()
}

/// Lines of `text` with their terminators kept
///
/// The final line has no terminator when the text does not end in a newline.
pub fn raw_lines(text: &str) -> std::str::SplitInclusive<'_, char> {
    text.split_inclusive('\n')
}

/// Whitespace-delimited word count, used for reporting only
pub fn estimate_word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Chunker over line-oriented text
#[derive(Debug, Clone)]
pub struct SlidingWindowChunker {
    config: ChunkerConfig,
}

impl Default for SlidingWindowChunker {
    fn default() -> Self {
        Self {
            config: ChunkerConfig::default(),
        }
    }
}

impl SlidingWindowChunker {
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Lazily chunk `lines` belonging to `source_id`
    pub fn chunks<I>(&self, source_id: &str, lines: I) -> Chunks<I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Chunks {
            config: self.config,
            source_id: source_id.to_string(),
            lines: lines.into_iter(),
            pending: VecDeque::new(),
            window: Vec::with_capacity(self.config.length + 1),
            sequence: 1,
            exhausted: false,
        }
    }

    /// Chunk a whole text eagerly
    pub fn chunk_text(&self, source_id: &str, text: &str) -> Vec<Chunk> {
        self.chunks(source_id, raw_lines(text)).collect()
    }
}

/// Iterator returned by [`SlidingWindowChunker::chunks`]
pub struct Chunks<I> {
    config: ChunkerConfig,
    source_id: String,
    lines: I,
    pending: VecDeque<String>,
    window: Vec<String>,
    sequence: u32,
    exhausted: bool,
}

impl<I> Chunks<I> {
    fn emit(&mut self) -> Option<Chunk> {
        if self.window.is_empty() {
            return None;
        }
        let text = self.window.join(" ");
        if text.trim().is_empty() {
            return None;
        }
        let chunk = Chunk {
            source_id: self.source_id.clone(),
            sequence: self.sequence,
            text,
        };
        self.sequence += 1;
        Some(chunk)
    }
}

impl<I> Iterator for Chunks<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                if self.window.len() <= self.config.length {
                    self.window.push(token);
                    continue;
                }

                // Window holds length + 1 tokens: cut it, keep the tail.
                let chunk = self.emit();
                let cut = self.window.len() - self.config.overlap;
                self.window.drain(..cut);
                self.window.push(token);

                if chunk.is_some() {
                    return chunk;
                }
                continue;
            }

            if self.exhausted {
                return None;
            }

            match self.lines.next() {
                Some(line) => {
                    let tokens = line_tokens(line.as_ref(), &self.config);
                    self.pending.extend(tokens);
                }
                None => {
                    self.exhausted = true;
                    let residual = self.emit();
                    self.window.clear();
                    return residual;
                }
            }
        }
    }
}

impl<I> std::iter::FusedIterator for Chunks<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(length: usize, overlap: usize) -> SlidingWindowChunker {
        SlidingWindowChunker::new(ChunkerConfig {
            length,
            overlap,
            min_token_len: 1,
            max_token_len: 24,
        })
        .unwrap()
    }

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_is_non_alpha() {
        assert!(is_non_alpha("12 34 56"));
        assert!(is_non_alpha("- 14 -"));
        assert!(!is_non_alpha("Section 4 covers data"));
        // exactly half is not "more than half"
        assert!(!is_non_alpha("ab12"));
        assert!(!is_non_alpha(""));
    }

    #[test]
    fn test_normalize_line_strips_urls() {
        assert_eq!(
            normalize_line("See HTTPS://Example.com/Policy?id=4 for Details  "),
            "see  for details"
        );
        assert_eq!(normalize_line("visit http://gw.edu"), "visit  ");
    }

    #[test]
    fn test_line_tokens_filters() {
        let config = ChunkerConfig::default();
        let tokens = line_tokens("It's the WWW.example site's rule: a b", &config);
        // "its" kept, "www.example" dropped, "sites" kept, 1-char tokens dropped
        assert_eq!(tokens, vec!["its", "the", "sites", "rule:"]);
    }

    #[test]
    fn test_lone_s_token_is_dropped() {
        let config = ChunkerConfig::default();
        let tokens = line_tokens("the staff ' s office", &config);
        assert_eq!(tokens, vec!["the", "staff", "office"]);
    }

    #[test]
    fn test_token_length_bounds_are_exclusive() {
        let config = ChunkerConfig {
            length: 10,
            overlap: 2,
            min_token_len: 2,
            max_token_len: 5,
        };
        let tokens = line_tokens("ab abc abcd abcde", &config);
        assert_eq!(tokens, vec!["abc", "abcd"]);
    }

    #[test]
    fn test_non_alpha_check_uses_raw_line() {
        let config = ChunkerConfig::default();
        // Trailing padding makes the raw line mostly whitespace.
        assert!(line_tokens("policy          ", &config).is_empty());
        assert_eq!(line_tokens("policy", &config), vec!["policy"]);
    }

    #[test]
    fn test_line_terminator_counts_as_non_alpha() {
        let config = ChunkerConfig::default();
        // Two of four characters are symbols; the newline tips it over half.
        assert_eq!(line_tokens("ab 1", &config), vec!["ab"]);
        assert!(line_tokens("ab 1\n", &config).is_empty());

        assert!(SlidingWindowChunker::default()
            .chunk_text("d", "ab 1\ncd 2\n")
            .is_empty());
        // An unterminated last line is judged without a newline.
        let chunks = SlidingWindowChunker::default().chunk_text("d", "ab 1\ncd 2");
        assert_eq!(texts(&chunks), vec!["cd"]);
    }

    #[test]
    fn test_raw_lines_keep_terminators() {
        let lines: Vec<&str> = raw_lines("one\n\ntwo").collect();
        assert_eq!(lines, vec!["one\n", "\n", "two"]);
    }

    #[test]
    fn test_reference_sentence() {
        let chunks = chunker(5, 2).chunk_text(
            "doc",
            "The Quick BROWN fox jumps over 12345 the lazy dog's leg.",
        );
        assert_eq!(
            texts(&chunks),
            vec![
                "the quick brown fox jumps over",
                "jumps over 12345 the lazy dogs",
                "lazy dogs leg.",
            ]
        );
        let ids: Vec<u32> = chunks.iter().map(|c| c.sequence).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(chunks.iter().all(|c| c.source_id == "doc"));
    }

    #[test]
    fn test_no_qualifying_tokens_no_chunks() {
        let text = "\n   \n12 34 56\n--- 7 ---\n";
        assert!(chunker(5, 2).chunk_text("empty", text).is_empty());
        assert!(chunker(5, 2).chunk_text("empty", "").is_empty());
    }

    #[test]
    fn test_short_source_emits_single_residual() {
        let chunks = chunker(5, 2).chunk_text("short", "alpha beta");
        assert_eq!(texts(&chunks), vec!["alpha beta"]);
    }

    #[test]
    fn test_tokens_flow_across_lines() {
        let text = "one two three\n\nfour five six\nseven";
        let chunks = chunker(4, 1).chunk_text("lines", text);
        assert_eq!(
            texts(&chunks),
            vec!["one two three four five", "five six seven"]
        );
    }

    #[test]
    fn test_zero_overlap_carries_only_new_token() {
        let chunks = chunker(2, 0).chunk_text("z", "aa bb cc dd ee ff gg");
        assert_eq!(texts(&chunks), vec!["aa bb cc", "dd ee ff", "gg"]);
    }

    #[test]
    fn test_chunks_are_lazy() {
        let endless = std::iter::repeat("policy statement applies");
        let first: Vec<Chunk> = chunker(5, 2).chunks("inf", endless).take(3).collect();
        assert_eq!(first.len(), 3);
        assert_eq!(first[2].sequence, 3);
    }

    #[test]
    fn test_rerun_is_deterministic() {
        let c = chunker(6, 3);
        let text = "Data classification guide for university records\nand systems.";
        assert_eq!(c.chunk_text("a", text), c.chunk_text("a", text));
    }

    #[test]
    fn test_config_validation() {
        assert!(ChunkerConfig::default().validate().is_ok());
        let zero = ChunkerConfig {
            length: 0,
            overlap: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());
        let wide = ChunkerConfig {
            length: 4,
            overlap: 4,
            ..Default::default()
        };
        assert!(SlidingWindowChunker::new(wide).is_err());
        let bounds = ChunkerConfig {
            min_token_len: 5,
            max_token_len: 5,
            ..Default::default()
        };
        assert!(bounds.validate().is_err());
    }

    #[test]
    fn test_estimate_word_count() {
        assert_eq!(estimate_word_count("a  b\n\tc\n"), 3);
        assert_eq!(estimate_word_count(""), 0);
    }
}
