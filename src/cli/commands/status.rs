//! Status command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::{API_VERSION, ENGINE_VERSION};

/// Show engine and API versions.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format (text, json).
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(Serialize)]
struct VersionReport {
    engine_version: &'static str,
    api_version: &'static str,
    crate_version: &'static str,
}

/// Run the status command.
pub fn run_status(args: StatusArgs) -> Result<()> {
    let report = VersionReport {
        engine_version: ENGINE_VERSION,
        api_version: API_VERSION,
        crate_version: env!("CARGO_PKG_VERSION"),
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => {
            println!("Marquee");
            println!("=======");
            println!("Engine version: {}", report.engine_version);
            println!("API version:    {}", report.api_version);
            println!("Crate version:  {}", report.crate_version);
        }
    }
    Ok(())
}
