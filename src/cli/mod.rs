//! Command-line interface.
//!
//! Usage:
//!   marquee start --config config/marquee.toml
//!   marquee config validate --config config/marquee.toml
//!   marquee config show --config config/marquee.toml --format json
//!   marquee status [--format json]

pub mod commands;

use clap::{Parser, Subcommand};

/// Marquee - digital-signage fleet backend.
#[derive(Parser, Debug)]
#[command(name = "marquee")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path.
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the Marquee service.
    Start(commands::StartArgs),
    /// Configuration operations.
    Config(commands::ConfigArgs),
    /// Show engine and API versions.
    Status(commands::StatusArgs),
}
