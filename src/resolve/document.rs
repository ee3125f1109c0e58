//! Render documents.
//!
//! The wire form a polling screen consumes: a status block carrying the
//! screen's identity and effective version, merged with the resolved
//! configuration's head/bottom/body sections. Unknown or degraded screens
//! get the minimal form — a status block with `active = false` and
//! nothing else — so a disconnected or decommissioned display renders a
//! blank instead of erroring.

use serde::{Deserialize, Serialize};

use crate::fleet::configuration::{BodyBlock, BottomBlock, ConfigId, HeadBlock};
use crate::fleet::version::ConfigVersion;

/// Fixed maintenance-mode text shown by screens that are not active.
pub const MAINTENANCE_TEXT: &str = "Schermo in manutenzione";

/// Identity and liveness block of a render document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBlock {
    /// Effective active state after group overrides.
    pub active: bool,

    /// Maintenance-mode text for inactive rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_text: Option<String>,

    /// The screen's own name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_name: Option<String>,

    /// The owning group's name, absent for ungrouped screens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,

    /// Effective configuration version for staleness checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_version: Option<ConfigVersion>,

    /// Effective configuration id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_id: Option<ConfigId>,
}

impl StatusBlock {
    /// The minimal status for unknown or degraded screens.
    pub fn inactive() -> Self {
        Self {
            active: false,
            maintenance_text: None,
            screen_name: None,
            group_name: None,
            config_version: None,
            config_id: None,
        }
    }
}

/// The full document served to a polling screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderDocument {
    pub status: StatusBlock,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<HeadBlock>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<BottomBlock>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyBlock>,
}

impl RenderDocument {
    /// The minimal document for unknown screens.
    pub fn inactive() -> Self {
        Self {
            status: StatusBlock::inactive(),
            head: None,
            bottom: None,
            body: None,
        }
    }
}
