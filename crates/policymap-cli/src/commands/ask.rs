//! Ask command

use crate::app::AskArgs;
use anyhow::Result;
use policymap_core::{Config, OpenAiClient};

pub fn run(args: AskArgs, config: &Config) -> Result<()> {
    let client = OpenAiClient::new(config.llm_service.clone(), config.retry.clone())?;
    let answer = client.ask(&args.prompt.join(" "))?;
    println!("{}", answer);
    Ok(())
}
