//! casfs CLI Binary
//!
//! Command-line interface for browsing content-addressed directory trees.

use anyhow::Context;
use casfs::config::ConfigLoader;
use casfs::logging::init_logging;
use casfs::tooling::cli::{Cli, CliContext};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    init_logging(Some(&config.logging)).context("Failed to initialize logging")?;

    let context = CliContext::with_config(cli.bundle.clone(), &config)
        .with_context(|| format!("Failed to open bundle {}", cli.bundle.display()))?;
    let output = context.execute(&cli.command)?;
    println!("{}", output);
    Ok(())
}
