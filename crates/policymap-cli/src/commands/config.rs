//! Config command

use crate::app::{ConfigAction, ConfigArgs};
use anyhow::Result;
use policymap_core::{Config, PolicyMapError};
use std::path::Path;

pub fn run(args: ConfigArgs, path: &Path) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let config = Config::load_from(path)?;
            config.validate()?;
            println!("# {}", path.display());
            print!("{}", serde_yaml::to_string(&config)?);
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                return Err(PolicyMapError::InvalidInput(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ))
                .into());
            }
            Config::default().save_to(path)?;
            println!("Wrote default configuration to {}", path.display());
        }
    }
    Ok(())
}
