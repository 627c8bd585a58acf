//! Extract command

use crate::app::ExtractArgs;
use anyhow::Result;
use policymap_core::{Config, PdfExtractor};

pub fn run(args: ExtractArgs, config: &Config) -> Result<()> {
    let layout = config.layout();
    let pdf_dir = args.pdf_dir.unwrap_or(layout.pdf_dir);
    let txt_dir = args.txt_dir.unwrap_or(layout.txt_dir);

    let stats = PdfExtractor::new().extract_directory(&pdf_dir, &txt_dir)?;

    println!(
        "Extracted {} PDF(s) into {}",
        stats.written.len(),
        txt_dir.display()
    );
    if !stats.skipped.is_empty() {
        println!("Skipped {} PDF(s):", stats.skipped.len());
        for path in &stats.skipped {
            println!("  {}", path.display());
        }
    }

    Ok(())
}
