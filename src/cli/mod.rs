pub mod mask;
pub mod output;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::privacy::NikkiConfig;

/// Mask personal information in Japanese journal entries
#[derive(Debug, Parser)]
#[command(name = "nikki-privacy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Mask emails, phone numbers, URLs, postal codes, names and places
    Mask(mask::MaskArgs),

    /// Report personal information; exits 1 if any is found
    Check(mask::CheckArgs),

    /// List masked categories and their placeholders
    Categories(mask::CategoriesArgs),
}

/// Run the CLI
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let config = NikkiConfig::load(&cwd)?;

    init_logging(&config.log.level);
    config.log_notices();
    if !config.output.color || !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Mask(args) => mask::run(args, &config),
        Commands::Check(args) => mask::run_check(args, &config),
        Commands::Categories(args) => mask::run_categories(args),
    }
}

/// Install the stderr subscriber; RUST_LOG overrides the configured level
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
