//! Marquee - backend core for a fleet of digital-signage screens.
//!
//! Marquee groups display screens, assigns each screen (or group) a
//! visual configuration, and serves the resolved configuration to screens
//! polling for updates. Edits propagate through per-entity version
//! counters so that pollers detect staleness, with group-level and
//! screen-level overrides composing deterministically.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  HTTP Front Door (external)                     │
//! │        admin CRUD endpoints      │      screen polling          │
//! └─────────────────────────────────────────────────────────────────┘
//!                                  │
//! ┌───────────────────────────────┐ ┌───────────────────────────────┐
//! │        Entity Registry        │ │       Resolution Engine       │
//! │  CRUD │ uniqueness │ cascades │ │  override rules │ documents   │
//! └───────────────────────────────┘ └───────────────────────────────┘
//!                 │                                 │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Version Propagation                         │
//! │        fan-out bumps │ own-field bumps │ atomic commits         │
//! └─────────────────────────────────────────────────────────────────┘
//!                                  │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  Fleet Store (relational, external)             │
//! │            screens │ screen_groups │ configurations             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! ## Core
//! - [`core::config`] - Configuration parsing and validation
//! - [`core::error`] - Error types and front-door mapping
//! - [`core::auth`] - Authenticated-context values
//! - [`core::runtime`] - Main runtime orchestration
//!
//! ## Fleet
//! - [`fleet::configuration`] - Visual configuration documents
//! - [`fleet::screen`] - Screen records
//! - [`fleet::group`] - Screen group records
//! - [`fleet::version`] - Configuration version counters
//! - [`fleet::registry`] - Entity registry (CRUD and cascades)
//! - [`fleet::propagation`] - Version propagation hooks
//! - [`fleet::bootstrap`] - Startup bootstrap
//!
//! ## Resolution
//! - [`resolve::engine`] - Effective-state resolution
//! - [`resolve::document`] - Render documents
//!
//! ## Storage
//! - [`store`] - Storage collaborator contracts
//! - [`store::memory`] - In-memory fleet store
//!
//! ## Operations
//! - [`ops::observability`] - Metrics and health checks
//!
//! ## CLI
//! - [`cli::commands`] - CLI command implementations
//!
//! # Key Invariants
//!
//! - **ACTIVE-OVERRIDE**: an inactive screen is effectively inactive
//!   regardless of its group; otherwise a grouped screen takes the
//!   group's active state
//! - **GROUP-INHERIT**: a grouped screen inherits the group's
//!   configuration reference and version counter
//! - **BUMP-FANOUT**: a configuration edit advances the counter of every
//!   live screen and group referencing it, atomically with the edit
//! - **VERSION-MONOTONE**: version counters start at 1 and only ever
//!   move forward, by exactly one per committed change
//! - **TOMBSTONE-HIDDEN**: deleted rows are invisible to normal queries,
//!   including resolution

// Core infrastructure
pub mod core;

// Fleet entities, registry and propagation
pub mod fleet;

// Effective-state resolution
pub mod resolve;

// Storage contracts and in-memory store
pub mod store;

// Operations and observability
pub mod ops;

// CLI
pub mod cli;

// Re-exports for convenience
pub use self::core::{auth, config, error, runtime};
pub use fleet::{bootstrap, configuration, group, propagation, registry, screen, version};
pub use ops::observability;
pub use resolve::{document, engine};

/// Version of the resolution/propagation engine.
pub const ENGINE_VERSION: &str = "1.0";

/// Version of the operation surface exposed to the front door.
pub const API_VERSION: &str = "1.0";
