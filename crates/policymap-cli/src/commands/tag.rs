//! Tag command

use crate::app::TagArgs;
use anyhow::Result;
use policymap_core::{tag_table, Config, KeywordTagger};

pub fn run(args: TagArgs, config: &Config) -> Result<()> {
    let layout = config.layout();
    let counts_path = args.counts.unwrap_or_else(|| layout.keyword_counts());
    let input = args.input.unwrap_or(layout.combined_chunks);
    let output = args.output.unwrap_or(layout.keyword_table);
    let lemmas = args.lemmas.or_else(|| config.keywords.lemma_file.clone());

    let tagger = KeywordTagger::from_config(&config.keywords);
    tracing::debug!("Vocabulary of {} keywords", tagger.vocabulary().len());

    let report = tag_table(&tagger, &input, lemmas.as_deref(), &output)?;
    report.counts.write_csv(&counts_path)?;

    println!(
        "Tagged {} of {} rows -> {}",
        report.tagged_rows,
        report.rows,
        output.display()
    );
    println!(
        "{} distinct keywords, {} occurrences -> {}",
        report.counts.distinct(),
        report.counts.total(),
        counts_path.display()
    );
    Ok(())
}
