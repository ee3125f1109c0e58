//! Marquee - unified CLI entrypoint.
//!
//! Usage:
//!   marquee start --config config/marquee.toml
//!   marquee config validate --config config/marquee.toml
//!   marquee status [--format json]

use anyhow::Result;
use clap::Parser;
use marquee::cli::commands::{run_config, run_start_with_config, run_status};
use marquee::cli::{Cli, Commands};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine config path - use global --config or default
    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config/marquee.toml"));

    match cli.command {
        Commands::Start(_args) => {
            run_start_with_config(&config_path, cli.log_level.as_deref()).await
        }
        Commands::Config(args) => run_config(args),
        Commands::Status(args) => run_status(args),
    }
}
