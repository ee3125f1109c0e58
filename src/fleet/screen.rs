//! Screen records.
//!
//! A screen is a single physical or virtual display unit. It references a
//! configuration by id, optionally belongs to one group, and carries its
//! own monotone `config_v` counter for staleness detection by pollers.
//! Deletion is a tombstone and also forces the screen inactive.

use serde::{Deserialize, Serialize};

use crate::fleet::configuration::ConfigId;
use crate::fleet::group::GroupId;
use crate::fleet::version::ConfigVersion;

/// Screen identifier.
pub type ScreenId = u64;

/// A registered display screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screen {
    /// Unique screen identifier.
    pub id: ScreenId,

    /// Display name, unique among non-deleted screens.
    pub name: String,

    /// Physical location description.
    pub location: Option<String>,

    /// Whether the screen should render content.
    pub active: bool,

    /// Group this screen belongs to, if any. A weak reference: the group
    /// overrides the screen's active state and configuration while live.
    pub group_id: Option<GroupId>,

    /// Referenced configuration.
    pub config_id: ConfigId,

    /// Own configuration version counter.
    pub config_v: ConfigVersion,

    /// Tombstone flag; hidden from normal queries when set.
    pub deleted: bool,
}

impl Screen {
    /// Create a new live screen with an initial version counter.
    pub fn new(id: ScreenId, name: impl Into<String>, config_id: ConfigId) -> Self {
        Self {
            id,
            name: name.into(),
            location: None,
            active: true,
            group_id: None,
            config_id,
            config_v: ConfigVersion::initial(),
            deleted: false,
        }
    }

    /// Check if this screen is a tombstone.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Check if this screen belongs to a group.
    pub fn is_grouped(&self) -> bool {
        self.group_id.is_some()
    }

    /// Tombstone this screen. A deleted screen is never active.
    pub fn tombstone(&mut self) {
        self.deleted = true;
        self.active = false;
    }

    /// Detach this screen from its group and deactivate it.
    ///
    /// Used when the owning group is tombstoned, so no screen is left in a
    /// "grouped but group gone" state.
    pub fn detach(&mut self) {
        self.group_id = None;
        self.active = false;
    }
}
