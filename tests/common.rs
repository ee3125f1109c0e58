//! Common test utilities.
//!
//! This module contains shared helpers for integration tests.
//! Import with `mod common;` in test files.

#![allow(dead_code)]

use marquee::core::auth::AuthContext;
use marquee::core::config::Config;
use marquee::fleet::bootstrap;
use marquee::fleet::configuration::ConfigId;
use marquee::fleet::registry::EntityRegistry;
use marquee::resolve::engine::ResolutionEngine;
use marquee::store::memory::MemoryStore;
use marquee::store::FleetStore;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Create a minimal valid configuration file.
pub fn create_minimal_config() -> NamedTempFile {
    let config_content = r#"
[service]
bind = "127.0.0.1:5000"

[telemetry]
log_level = "info"
"#;

    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(config_content.as_bytes())
        .expect("Failed to write config");
    file
}

/// Create a configuration file with bootstrap fixtures.
pub fn create_config_with_fixtures() -> NamedTempFile {
    let config_content = r#"
[service]
bind = "127.0.0.1:5000"

[[bootstrap.groups]]
name = "floor2"
location = "second floor"

[[bootstrap.screens]]
name = "lobby"
location = "entrance hall"

[[bootstrap.screens]]
name = "meeting-room"
group = "floor2"
"#;

    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(config_content.as_bytes())
        .expect("Failed to write config");
    file
}

/// Load a config from a temp file.
pub fn load_config(file: &NamedTempFile) -> Config {
    Config::from_file(file.path()).expect("Failed to load config")
}

/// An authorized admin context.
pub fn admin() -> AuthContext {
    AuthContext::user(1)
}

/// A bootstrapped fleet: store, registry, engine, stock configuration id.
pub fn bootstrapped_fleet() -> (
    Arc<dyn FleetStore>,
    EntityRegistry,
    ResolutionEngine,
    ConfigId,
) {
    let store: Arc<dyn FleetStore> = Arc::new(MemoryStore::new());
    let report = bootstrap::run(&store, &Config::default()).expect("bootstrap failed");
    let registry = EntityRegistry::new(Arc::clone(&store));
    let engine = ResolutionEngine::new(Arc::clone(&store));
    (store, registry, engine, report.default_config_id)
}
