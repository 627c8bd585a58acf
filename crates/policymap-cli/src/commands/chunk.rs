//! Chunk command

use crate::app::ChunkArgs;
use anyhow::Result;
use policymap_core::{chunk_directory, Config, SlidingWindowChunker};

pub fn run(args: ChunkArgs, config: &Config) -> Result<()> {
    let layout = config.layout();
    let txt_dir = args.txt_dir.unwrap_or(layout.txt_dir);
    let chunk_dir = args.chunk_dir.unwrap_or(layout.chunk_dir);

    let mut chunking = config.chunking;
    if let Some(length) = args.length {
        chunking.length = length;
    }
    if let Some(overlap) = args.overlap {
        chunking.overlap = overlap;
    }
    let chunker = SlidingWindowChunker::new(chunking)?;

    let stats = chunk_directory(&txt_dir, &chunk_dir, &chunker)?;

    for source in &stats {
        println!("  {}: {} chunks", source.source_id, source.chunks);
    }
    println!(
        "Chunked {} file(s) into {} chunks ({} tokens, {} overlap)",
        stats.len(),
        stats.iter().map(|s| s.chunks).sum::<usize>(),
        chunking.length,
        chunking.overlap
    );

    Ok(())
}
