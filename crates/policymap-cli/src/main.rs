//! Policymap CLI
//!
//! Runs the policy-document pipeline one stage at a time.

use anyhow::Result;
use clap::Parser;
use policymap_core::error::exit_codes;
use policymap_core::{Config, PolicyMapError};
use std::path::Path;
use tracing_subscriber::EnvFilter;

mod app;
mod commands;

use app::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("Error: {:#}", err);
        std::process::exit(exit_codes::GENERAL_ERROR);
    }

    if let Err(err) = run(cli) {
        tracing::error!("{:#}", err);
        std::process::exit(exit_code(&err));
    }
}

fn init_tracing(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if verbose {
        filter = filter.add_directive(tracing::Level::DEBUG.into());
    }

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.unwrap_or_else(Config::default_path);
    let load = || -> Result<Config> {
        let config = Config::load_from(&config_path)?;
        config.validate()?;
        Ok(config)
    };

    match cli.command {
        Commands::Extract(args) => commands::extract::run(args, &load()?),
        Commands::Chunk(args) => commands::chunk::run(args, &load()?),
        Commands::Concat(args) => commands::concat::run(args, &load()?),
        Commands::Tag(args) => commands::tag::run(args, &load()?),
        Commands::Embed(args) => commands::embed::run(args, &load()?),
        Commands::Profile(args) => commands::profile::run(args, &load()?),
        Commands::Ask(args) => commands::ask::run(args, &load()?),
        Commands::Config(args) => commands::config::run(args, &config_path),
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<PolicyMapError>()
        .map(PolicyMapError::exit_code)
        .unwrap_or(exit_codes::GENERAL_ERROR)
}
