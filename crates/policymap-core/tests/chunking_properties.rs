//! Property tests for the sliding-window chunker

use policymap_core::index::{ChunkerConfig, SlidingWindowChunker};
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = ChunkerConfig> {
    (1usize..24).prop_flat_map(|length| {
        (0..length).prop_map(move |overlap| ChunkerConfig {
            length,
            overlap,
            ..ChunkerConfig::default()
        })
    })
}

/// Tokens that always survive filtering: lowercase, apostrophe-free, never
/// `s` or `www*`, and well inside the length bounds.
fn tokens_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,9}".prop_map(|t| format!("x{}", t)), 0..300)
}

fn expected_chunks(tokens: usize, config: &ChunkerConfig) -> usize {
    let (l, o) = (config.length, config.overlap);
    if tokens == 0 {
        0
    } else if tokens <= o {
        1
    } else {
        (tokens - o).div_ceil(l + 1 - o)
    }
}

fn lines(tokens: &[String], per_line: usize) -> Vec<String> {
    tokens.chunks(per_line).map(|c| c.join(" ")).collect()
}

proptest! {
    #[test]
    fn prop_chunk_count_matches_stride(
        config in config_strategy(),
        tokens in tokens_strategy(),
        per_line in 1usize..12,
    ) {
        let chunker = SlidingWindowChunker::new(config).unwrap();
        let chunks: Vec<_> = chunker.chunks("doc", lines(&tokens, per_line)).collect();
        prop_assert_eq!(chunks.len(), expected_chunks(tokens.len(), &config));
    }

    #[test]
    fn prop_windows_overlap_and_cover_every_token(
        config in config_strategy(),
        tokens in tokens_strategy(),
        per_line in 1usize..12,
    ) {
        let chunker = SlidingWindowChunker::new(config).unwrap();
        let chunks: Vec<_> = chunker.chunks("doc", lines(&tokens, per_line)).collect();
        let windows: Vec<Vec<&str>> = chunks.iter().map(|c| c.text.split(' ').collect()).collect();

        for (i, chunk) in chunks.iter().enumerate() {
            prop_assert_eq!(chunk.sequence as usize, i + 1);
            prop_assert_eq!(chunk.source_id.as_str(), "doc");
        }

        for pair in windows.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            prop_assert_eq!(prev.len(), config.length + 1);
            prop_assert_eq!(&prev[prev.len() - config.overlap..], &next[..config.overlap]);
        }

        // Dropping each window's carried prefix reassembles the input.
        let mut rebuilt: Vec<&str> = Vec::new();
        for (i, window) in windows.iter().enumerate() {
            let skip = if i == 0 { 0 } else { config.overlap };
            rebuilt.extend(&window[skip..]);
        }
        let expected: Vec<&str> = tokens.iter().map(String::as_str).collect();
        prop_assert_eq!(rebuilt, expected);
    }

    #[test]
    fn prop_line_breaks_do_not_change_chunks(
        config in config_strategy(),
        tokens in tokens_strategy(),
        a in 1usize..12,
        b in 1usize..12,
    ) {
        let chunker = SlidingWindowChunker::new(config).unwrap();
        let left: Vec<_> = chunker.chunks("doc", lines(&tokens, a)).collect();
        let right: Vec<_> = chunker.chunks("doc", lines(&tokens, b)).collect();
        prop_assert_eq!(left, right);
    }
}

#[test]
fn test_default_config_on_long_input() {
    let words = ["policy", "data", "student", "privacy", "zoom", "risk", "tool"];
    let tokens: Vec<String> = (0..1000).map(|i| words[i % words.len()].to_string()).collect();
    let chunker = SlidingWindowChunker::default();
    let chunks: Vec<_> = chunker.chunks("doc", lines(&tokens, 10)).collect();

    // 65-token windows advancing by 49 tokens.
    assert_eq!(chunks.len(), (1000 - 16usize).div_ceil(49));
    assert!(chunks[..chunks.len() - 1]
        .iter()
        .all(|c| c.token_count() == 65));
}
