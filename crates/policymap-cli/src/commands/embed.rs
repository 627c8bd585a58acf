//! Embed command

use crate::app::EmbedArgs;
use anyhow::Result;
use policymap_core::index::EmbedProgress;
use policymap_core::{embed_table, Config, Embedder, OpenAiClient};

pub fn run(args: EmbedArgs, config: &Config) -> Result<()> {
    let layout = config.layout();
    let input = args.input.unwrap_or(layout.keyword_table);
    let output = args.output.unwrap_or(layout.embedding_table);

    if config.llm_service.api_key.is_none() {
        tracing::warn!("No API key set (POLICYMAP_API_KEY or OPENAI_API_KEY)");
    }
    let client = OpenAiClient::new(config.llm_service.clone(), config.retry.clone())?;

    println!(
        "Embedding with {} ({} dimensions)",
        Embedder::model_name(&client),
        client.dimensions()
    );

    let stats = embed_table(
        &input,
        &output,
        &client,
        Some(Box::new(|progress: EmbedProgress| {
            eprint!(
                "\rProcessing: {}/{} rows   ",
                progress.processed_rows, progress.total_rows
            );
        })),
    )?;

    eprintln!();
    println!("Embedding complete -> {}", output.display());
    println!("  Rows:        {}", stats.total_rows);
    println!("  Resumed:     {}", stats.resumed_rows);
    println!("  Embedded:    {}", stats.embedded_rows);
    println!("  Zero-filled: {}", stats.zero_filled_rows);

    Ok(())
}
