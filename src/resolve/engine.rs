//! Resolution engine.
//!
//! Computes the effective runtime state of a screen by composing screen
//! and group data under the override rules:
//!
//! - An inactive screen is effectively inactive no matter what its group
//!   says; otherwise a grouped screen takes the group's active state.
//! - A grouped screen inherits the group's configuration reference and
//!   version counter; an ungrouped screen uses its own.
//!
//! Resolution is a pure read, called at polling frequency by every screen
//! in the fleet, and never raises for a missing screen or a dangling
//! configuration reference — unattended display hardware must degrade to
//! a blank, not crash. The group lookup deliberately ignores the group's
//! tombstone flag: the registry detaches members in the same commit that
//! tombstones a group, so a live screen pointing at a tombstoned group
//! can only come from data written behind the registry's back, and in
//! that state the last-good group override degrades more gracefully than
//! a silent switch to the screen's own configuration.

use std::sync::Arc;

use crate::fleet::configuration::{ConfigId, StyleDocument};
use crate::fleet::screen::ScreenId;
use crate::fleet::version::ConfigVersion;
use crate::ops::observability::FleetMetrics;
use crate::resolve::document::{RenderDocument, StatusBlock, MAINTENANCE_TEXT};
use crate::store::{ConfigurationRepository, FleetStore, GroupRepository, ScreenRepository};

/// Effective runtime state of a screen, derived per request.
#[derive(Debug, Clone)]
pub struct ResolvedState {
    /// Effective active state after overrides.
    pub active: bool,

    /// The screen's name, absent for unknown screens.
    pub screen_name: Option<String>,

    /// The owning group's name, absent for ungrouped screens.
    pub group_name: Option<String>,

    /// Effective configuration id, absent when degraded.
    pub config_id: Option<ConfigId>,

    /// Effective configuration version, absent when degraded.
    pub config_version: Option<ConfigVersion>,

    /// The resolved configuration's content, absent when degraded.
    pub document: Option<StyleDocument>,
}

impl ResolvedState {
    /// The state returned for unknown or tombstoned screen ids.
    pub fn inactive() -> Self {
        Self {
            active: false,
            screen_name: None,
            group_name: None,
            config_id: None,
            config_version: None,
            document: None,
        }
    }

    /// The state for a known screen whose effective configuration is
    /// missing or tombstoned.
    fn degraded(screen_name: String, group_name: Option<String>) -> Self {
        Self {
            active: false,
            screen_name: Some(screen_name),
            group_name,
            config_id: None,
            config_version: None,
            document: None,
        }
    }

    /// Compose the wire document for this state.
    pub fn into_render_document(self) -> RenderDocument {
        let Some(screen_name) = self.screen_name else {
            return RenderDocument::inactive();
        };
        let (head, bottom, body) = match self.document {
            Some(document) => (Some(document.head), Some(document.bottom), Some(document.body)),
            None => (None, None, None),
        };
        RenderDocument {
            status: StatusBlock {
                active: self.active,
                maintenance_text: Some(MAINTENANCE_TEXT.to_string()),
                screen_name: Some(screen_name),
                group_name: self.group_name,
                config_version: self.config_version,
                config_id: self.config_id,
            },
            head,
            bottom,
            body,
        }
    }
}

/// The resolution engine over a fleet store.
pub struct ResolutionEngine {
    store: Arc<dyn FleetStore>,
    metrics: Arc<FleetMetrics>,
}

impl ResolutionEngine {
    /// Create an engine over the given store.
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self::with_metrics(store, Arc::new(FleetMetrics::new()))
    }

    /// Create an engine sharing a metrics registry.
    pub fn with_metrics(store: Arc<dyn FleetStore>, metrics: Arc<FleetMetrics>) -> Self {
        Self { store, metrics }
    }

    /// Resolve a screen's effective runtime state.
    ///
    /// Reads fleet state only; the only side effect is counter updates.
    pub fn resolve(&self, screen_id: ScreenId) -> ResolvedState {
        self.metrics.record_resolve();
        let Some(screen) = self.store.screen(screen_id) else {
            tracing::debug!(screen_id, "resolve: unknown screen");
            self.metrics.record_resolve_inactive();
            return ResolvedState::inactive();
        };

        let mut active = screen.active;
        let mut config_id = screen.config_id;
        let mut config_v = screen.config_v;
        let mut group_name = None;

        if let Some(group_id) = screen.group_id {
            // Tombstone flag intentionally ignored here; see module docs.
            if let Some(group) = self.store.group_any(group_id) {
                if active {
                    active = group.active;
                }
                config_id = group.config_id;
                config_v = group.config_v;
                group_name = Some(group.name);
            }
        }

        let Some(configuration) = self.store.configuration(config_id) else {
            tracing::debug!(screen_id, config_id, "resolve: dangling configuration reference");
            self.metrics.record_resolve_inactive();
            return ResolvedState::degraded(screen.name, group_name);
        };

        ResolvedState {
            active,
            screen_name: Some(screen.name),
            group_name,
            config_id: Some(config_id),
            config_version: Some(config_v),
            document: Some(configuration.document),
        }
    }

    /// Resolve a screen and compose its wire document.
    pub fn render(&self, screen_id: ScreenId) -> RenderDocument {
        self.resolve(screen_id).into_render_document()
    }
}
