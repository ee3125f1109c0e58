//! Screen group records.
//!
//! A group is a named collection of screens sharing active/configuration
//! overrides. Ownership is by back-reference: each member screen points at
//! the group via `group_id`. Tombstoning a group does not delete its
//! members; the registry detaches and deactivates them instead.

use serde::{Deserialize, Serialize};

use crate::fleet::configuration::ConfigId;
use crate::fleet::version::ConfigVersion;

/// Group identifier.
pub type GroupId = u64;

/// A registered screen group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenGroup {
    /// Unique group identifier.
    pub id: GroupId,

    /// Display name, unique among non-deleted groups.
    pub name: String,

    /// Physical location description.
    pub location: Option<String>,

    /// Whether member screens should render content. Overrides member
    /// active state unless the member itself is inactive.
    pub active: bool,

    /// Referenced configuration, inherited by all members.
    pub config_id: ConfigId,

    /// Group configuration version counter, inherited by all members.
    pub config_v: ConfigVersion,

    /// Tombstone flag; hidden from normal queries when set.
    pub deleted: bool,
}

impl ScreenGroup {
    /// Create a new live group with an initial version counter.
    pub fn new(id: GroupId, name: impl Into<String>, config_id: ConfigId) -> Self {
        Self {
            id,
            name: name.into(),
            location: None,
            active: true,
            config_id,
            config_v: ConfigVersion::initial(),
            deleted: false,
        }
    }

    /// Check if this group is a tombstone.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Tombstone this group.
    pub fn tombstone(&mut self) {
        self.deleted = true;
        self.active = false;
    }
}
