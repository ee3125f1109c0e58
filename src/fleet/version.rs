//! Configuration version counters.
//!
//! Every screen and group carries a `config_v` counter that polling
//! clients compare against the last version they rendered. The counter is
//! strictly monotone for a given entity (VERSION-MONOTONE): it starts at 1
//! when the entity is created with a configuration reference and only ever
//! moves forward, by exactly one per committed change.

use serde::{Deserialize, Serialize};

/// Monotone per-entity configuration version.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ConfigVersion(u64);

impl ConfigVersion {
    /// The version assigned at entity creation.
    pub const fn initial() -> Self {
        Self(1)
    }

    /// Create a version from a raw counter value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw counter value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The next version after a committed change.
    pub fn bump(self) -> Self {
        let next = Self(self.0 + 1);
        debug_assert!(
            next.0 > self.0,
            "VERSION-MONOTONE violation: {} -> {}",
            self.0,
            next.0
        );
        next
    }

    /// Check whether this version is newer than one a poller last saw.
    pub const fn is_newer_than(self, seen: ConfigVersion) -> bool {
        self.0 > seen.0
    }
}

impl std::fmt::Display for ConfigVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<u64> for ConfigVersion {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}
