//! Config command implementation.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::core::config::Config;

/// Configuration operations.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate configuration file.
    Validate {
        /// Config file path.
        #[arg(short, long, default_value = "config/marquee.toml")]
        config: PathBuf,
    },
    /// Print configuration with defaults applied.
    Show {
        /// Config file path.
        #[arg(short, long, default_value = "config/marquee.toml")]
        config: PathBuf,
        /// Output format (toml, json).
        #[arg(long, default_value = "toml")]
        format: String,
    },
}

/// Run the config command.
pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Validate { config } => validate_config(&config),
        ConfigCommand::Show { config, format } => show_config(&config, &format),
    }
}

fn validate_config(path: &PathBuf) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Config file not found: {:?}", path);
    }
    Config::from_file(path)?;
    println!("✓ Configuration is valid");
    Ok(())
}

fn show_config(path: &PathBuf, format: &str) -> Result<()> {
    let config = if path.exists() {
        Config::from_file(path)?
    } else {
        Config::default()
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&config)?),
        "toml" => println!("{}", toml::to_string_pretty(&config)?),
        other => anyhow::bail!("unknown format: {other} (expected toml or json)"),
    }
    Ok(())
}
