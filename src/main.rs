//! glossary - AI glossary notes for Markdown vaults
//!
//! glossary provides:
//! - Detection of `[[¤term]]` glossary links in a document
//! - Definitions generated by a local Ollama model, with an on-disk cache
//! - One glossary note per term, and link rewriting to `[[term]]`
//! - Unified output format (jsonl/json/md)

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cache;
mod cli;
mod core;
mod doctor;
mod glossary;
mod provider;
mod settings;
mod vault;

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    cli::run(cli).await
}
