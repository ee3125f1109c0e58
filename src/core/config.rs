//! Configuration parsing and validation.
//!
//! Marquee service configuration is loaded from TOML files with CLI
//! overrides. The `[bootstrap]` section can seed dev fixtures (groups and
//! screens) that the startup bootstrap creates idempotently.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level Marquee configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Service identity and front-door binding.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Fleet defaults.
    #[serde(default)]
    pub fleet: FleetConfig,

    /// Telemetry and observability configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Startup fixtures.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

/// Service identity and binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Bind address advertised to the HTTP front-door collaborator.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Fleet defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Description given to the stock configuration the bootstrap creates.
    #[serde(default = "default_config_description")]
    pub default_config_description: String,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            default_config_description: default_config_description(),
        }
    }
}

/// Telemetry and observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Startup fixtures created idempotently by the bootstrap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Groups to seed, by name.
    #[serde(default)]
    pub groups: Vec<SeedGroup>,

    /// Screens to seed, by name.
    #[serde(default)]
    pub screens: Vec<SeedScreen>,
}

/// A seed group fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default = "default_seed_active")]
    pub active: bool,
}

/// A seed screen fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedScreen {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default = "default_seed_active")]
    pub active: bool,
    /// Seed group to join, by name; must appear in `[bootstrap.groups]`
    /// or already exist in the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

// Default value functions

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_config_description() -> String {
    "Stock configuration".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_seed_active() -> bool {
    true
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| "failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).with_context(|| "failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.service
            .bind
            .parse::<std::net::SocketAddr>()
            .with_context(|| format!("service.bind is not a socket address: {}", self.service.bind))?;

        if !LOG_LEVELS.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "telemetry.log_level must be one of {:?}, got {:?}",
                LOG_LEVELS,
                self.telemetry.log_level
            );
        }

        if self.fleet.default_config_description.trim().is_empty() {
            anyhow::bail!("fleet.default_config_description must not be empty");
        }

        let mut group_names = std::collections::HashSet::new();
        for group in &self.bootstrap.groups {
            if group.name.trim().is_empty() {
                anyhow::bail!("bootstrap group name must not be empty");
            }
            if !group_names.insert(group.name.as_str()) {
                anyhow::bail!("duplicate bootstrap group name: {}", group.name);
            }
        }

        let mut screen_names = std::collections::HashSet::new();
        for screen in &self.bootstrap.screens {
            if screen.name.trim().is_empty() {
                anyhow::bail!("bootstrap screen name must not be empty");
            }
            if !screen_names.insert(screen.name.as_str()) {
                anyhow::bail!("duplicate bootstrap screen name: {}", screen.name);
            }
        }

        Ok(())
    }
}
