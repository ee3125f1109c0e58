//! In-memory fleet store.
//!
//! Stand-in for the external relational store: three BTreeMap tables
//! behind a single `parking_lot::RwLock`. A commit takes the write lock
//! once and applies the whole write set under it, so concurrent readers
//! observe either none or all of a multi-row update. Id counters are
//! atomic and survive failed commits with gaps, like relational
//! sequences.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::core::error::MarqueeResult;
use crate::fleet::configuration::{ConfigId, Configuration};
use crate::fleet::group::{GroupId, ScreenGroup};
use crate::fleet::screen::{Screen, ScreenId};
use crate::store::{
    ConfigurationRepository, FleetStore, GroupRepository, ScreenRepository, Write,
};

/// The three logical tables.
#[derive(Debug, Default)]
struct Tables {
    screens: BTreeMap<ScreenId, Screen>,
    groups: BTreeMap<GroupId, ScreenGroup>,
    configurations: BTreeMap<ConfigId, Configuration>,
}

/// In-memory transactional fleet store.
pub struct MemoryStore {
    tables: RwLock<Tables>,
    next_screen_id: AtomicU64,
    next_group_id: AtomicU64,
    next_configuration_id: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            next_screen_id: AtomicU64::new(1),
            next_group_id: AtomicU64::new(1),
            next_configuration_id: AtomicU64::new(1),
        }
    }

    /// Count of live screens.
    pub fn live_screen_count(&self) -> usize {
        self.tables
            .read()
            .screens
            .values()
            .filter(|s| !s.is_deleted())
            .count()
    }

    /// Count of live groups.
    pub fn live_group_count(&self) -> usize {
        self.tables
            .read()
            .groups
            .values()
            .filter(|g| !g.is_deleted())
            .count()
    }

    /// Count of live configurations.
    pub fn live_configuration_count(&self) -> usize {
        self.tables
            .read()
            .configurations
            .values()
            .filter(|c| !c.is_deleted())
            .count()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenRepository for MemoryStore {
    fn screen(&self, id: ScreenId) -> Option<Screen> {
        self.tables
            .read()
            .screens
            .get(&id)
            .filter(|s| !s.is_deleted())
            .cloned()
    }

    fn screen_by_name(&self, name: &str) -> Option<Screen> {
        self.tables
            .read()
            .screens
            .values()
            .find(|s| !s.is_deleted() && s.name == name)
            .cloned()
    }

    fn screens(&self) -> Vec<Screen> {
        self.tables
            .read()
            .screens
            .values()
            .filter(|s| !s.is_deleted())
            .cloned()
            .collect()
    }

    fn screens_referencing(&self, config_id: ConfigId) -> Vec<Screen> {
        self.tables
            .read()
            .screens
            .values()
            .filter(|s| !s.is_deleted() && s.config_id == config_id)
            .cloned()
            .collect()
    }

    fn screens_in_group(&self, group_id: GroupId) -> Vec<Screen> {
        self.tables
            .read()
            .screens
            .values()
            .filter(|s| !s.is_deleted() && s.group_id == Some(group_id))
            .cloned()
            .collect()
    }
}

impl GroupRepository for MemoryStore {
    fn group(&self, id: GroupId) -> Option<ScreenGroup> {
        self.tables
            .read()
            .groups
            .get(&id)
            .filter(|g| !g.is_deleted())
            .cloned()
    }

    fn group_any(&self, id: GroupId) -> Option<ScreenGroup> {
        self.tables.read().groups.get(&id).cloned()
    }

    fn group_by_name(&self, name: &str) -> Option<ScreenGroup> {
        self.tables
            .read()
            .groups
            .values()
            .find(|g| !g.is_deleted() && g.name == name)
            .cloned()
    }

    fn groups(&self) -> Vec<ScreenGroup> {
        self.tables
            .read()
            .groups
            .values()
            .filter(|g| !g.is_deleted())
            .cloned()
            .collect()
    }

    fn groups_referencing(&self, config_id: ConfigId) -> Vec<ScreenGroup> {
        self.tables
            .read()
            .groups
            .values()
            .filter(|g| !g.is_deleted() && g.config_id == config_id)
            .cloned()
            .collect()
    }
}

impl ConfigurationRepository for MemoryStore {
    fn configuration(&self, id: ConfigId) -> Option<Configuration> {
        self.tables
            .read()
            .configurations
            .get(&id)
            .filter(|c| !c.is_deleted())
            .cloned()
    }

    fn configurations(&self) -> Vec<Configuration> {
        self.tables
            .read()
            .configurations
            .values()
            .filter(|c| !c.is_deleted())
            .cloned()
            .collect()
    }
}

impl FleetStore for MemoryStore {
    fn allocate_screen_id(&self) -> ScreenId {
        self.next_screen_id.fetch_add(1, Ordering::SeqCst)
    }

    fn allocate_group_id(&self) -> GroupId {
        self.next_group_id.fetch_add(1, Ordering::SeqCst)
    }

    fn allocate_configuration_id(&self) -> ConfigId {
        self.next_configuration_id.fetch_add(1, Ordering::SeqCst)
    }

    fn commit(&self, writes: Vec<Write>) -> MarqueeResult<()> {
        let mut tables = self.tables.write();
        for write in writes {
            match write {
                Write::Screen(screen) => {
                    tables.screens.insert(screen.id, screen);
                }
                Write::Group(group) => {
                    tables.groups.insert(group.id, group);
                }
                Write::Configuration(configuration) => {
                    tables.configurations.insert(configuration.id, configuration);
                }
            }
        }
        Ok(())
    }
}
