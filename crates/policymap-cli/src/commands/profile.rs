//! Profile command

use crate::app::ProfileArgs;
use anyhow::Result;
use policymap_core::{profile_table, write_profiles, Config};

pub fn run(args: ProfileArgs, config: &Config) -> Result<()> {
    let layout = config.layout();
    let input = args.input.unwrap_or(layout.embedding_table);
    let output_dir = args.output_dir.unwrap_or(layout.results_dir);

    let profiles = profile_table(&input, &config.profile)?;
    for profile in &profiles {
        let centroid = match profile.centroid {
            Some((x, y)) => format!(" at ({:.3}, {:.3})", x, y),
            None => String::new(),
        };
        println!(
            "  {}: {} rows, {} keywords ({} unique){}",
            profile.name,
            profile.rows,
            profile.keywords.len(),
            profile.unique().len(),
            centroid
        );
    }

    let written = write_profiles(&profiles, &config.profile, &output_dir)?;
    println!("Wrote {} file(s) to {}", written.len(), output_dir.display());
    Ok(())
}
