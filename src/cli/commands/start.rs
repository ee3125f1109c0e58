//! Start command implementation.

use crate::core::config::Config;
use crate::core::runtime::Runtime;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Start the Marquee service.
#[derive(Args, Debug)]
pub struct StartArgs {
    // No additional arguments - config is handled globally
}

/// Initialize tracing subscriber if the telemetry feature is enabled.
#[cfg(feature = "telemetry")]
fn init_tracing(default_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

#[cfg(not(feature = "telemetry"))]
fn init_tracing(_default_level: &str) {}

/// Run the start command with the given config path.
pub async fn run_start_with_config(
    config_path: &PathBuf,
    log_level: Option<&str>,
) -> Result<()> {
    let config = Config::from_file(config_path)
        .with_context(|| format!("failed to load config from {:?}", config_path))?;

    init_tracing(log_level.unwrap_or(&config.telemetry.log_level));

    let mut runtime = Runtime::new(config)?;
    runtime.run().await
}
