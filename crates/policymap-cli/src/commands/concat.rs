//! Concat command

use crate::app::ConcatArgs;
use anyhow::Result;
use policymap_core::{concat_directory, Config};

pub fn run(args: ConcatArgs, config: &Config) -> Result<()> {
    let layout = config.layout();
    let chunk_dir = args.chunk_dir.unwrap_or(layout.chunk_dir);
    let output = args.output.unwrap_or(layout.combined_chunks);

    let stats = concat_directory(&chunk_dir, &output)?;

    println!(
        "Combined {} file(s), {} rows -> {}",
        stats.files.len(),
        stats.rows,
        output.display()
    );
    Ok(())
}
