//! Storage collaborator contracts.
//!
//! The fleet is persisted by an external relational store. This module
//! defines the contracts the core needs from it: typed filtered lookups
//! per entity (by id, by name, excluding tombstones) and an atomic
//! multi-row [`FleetStore::commit`]. Version-bump fan-outs and cascade
//! detaches are expressed as a single write set so the store applies them
//! in one transaction — a poller must never observe a new configuration
//! body paired with a stale version counter.
//!
//! [`memory::MemoryStore`] is the in-process implementation used for
//! tests and development.

pub mod memory;

use crate::core::error::MarqueeResult;
use crate::fleet::configuration::{ConfigId, Configuration};
use crate::fleet::group::{GroupId, ScreenGroup};
use crate::fleet::screen::{Screen, ScreenId};

/// A single row write. Puts either insert or replace the row with the
/// same id; tombstoning is a put of the flagged row.
#[derive(Debug, Clone)]
pub enum Write {
    Screen(Screen),
    Group(ScreenGroup),
    Configuration(Configuration),
}

/// Typed screen lookups. All lookups exclude tombstones.
pub trait ScreenRepository {
    /// Fetch a live screen by id.
    fn screen(&self, id: ScreenId) -> Option<Screen>;

    /// Fetch a live screen by name.
    fn screen_by_name(&self, name: &str) -> Option<Screen>;

    /// All live screens, ordered by id.
    fn screens(&self) -> Vec<Screen>;

    /// Live screens referencing a configuration directly.
    fn screens_referencing(&self, config_id: ConfigId) -> Vec<Screen>;

    /// Live member screens of a group.
    fn screens_in_group(&self, group_id: GroupId) -> Vec<Screen>;
}

/// Typed group lookups.
pub trait GroupRepository {
    /// Fetch a live group by id.
    fn group(&self, id: GroupId) -> Option<ScreenGroup>;

    /// Fetch a group by id regardless of its tombstone flag.
    ///
    /// The render path resolves a member screen's group without the
    /// tombstone filter; see [`crate::resolve::engine`] for why that
    /// behavior is kept.
    fn group_any(&self, id: GroupId) -> Option<ScreenGroup>;

    /// Fetch a live group by name.
    fn group_by_name(&self, name: &str) -> Option<ScreenGroup>;

    /// All live groups, ordered by id.
    fn groups(&self) -> Vec<ScreenGroup>;

    /// Live groups referencing a configuration.
    fn groups_referencing(&self, config_id: ConfigId) -> Vec<ScreenGroup>;
}

/// Typed configuration lookups.
pub trait ConfigurationRepository {
    /// Fetch a live configuration by id.
    fn configuration(&self, id: ConfigId) -> Option<Configuration>;

    /// All live configurations, ordered by id.
    fn configurations(&self) -> Vec<Configuration>;
}

/// The full storage contract: per-entity repositories, id allocation, and
/// atomic multi-row commit.
pub trait FleetStore:
    ScreenRepository + GroupRepository + ConfigurationRepository + Send + Sync
{
    /// Allocate the next screen id. Ids are never reused; allocation
    /// outside a failed commit leaves a gap, as relational sequences do.
    fn allocate_screen_id(&self) -> ScreenId;

    /// Allocate the next group id.
    fn allocate_group_id(&self) -> GroupId;

    /// Allocate the next configuration id.
    fn allocate_configuration_id(&self) -> ConfigId;

    /// Apply a write set atomically. Either every row lands or none does.
    fn commit(&self, writes: Vec<Write>) -> MarqueeResult<()>;
}
