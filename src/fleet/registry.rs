//! Entity registry.
//!
//! Create/read/update/tombstone for screens, groups and configurations,
//! with name uniqueness among non-deleted siblings and referential checks
//! at write time (`config_id` and `group_id` must point at live rows).
//! Every mutation is one atomic commit that already contains its version
//! bumps and cascades, so a failed commit leaves nothing half-applied.

use std::sync::Arc;

use crate::core::auth::AuthContext;
use crate::core::error::{EntityKind, MarqueeError, MarqueeResult};
use crate::fleet::configuration::{ConfigId, Configuration, StyleDocument};
use crate::fleet::group::{GroupId, ScreenGroup};
use crate::fleet::propagation;
use crate::fleet::screen::{Screen, ScreenId};
use crate::ops::observability::FleetMetrics;
use crate::store::{
    ConfigurationRepository, FleetStore, GroupRepository, ScreenRepository, Write,
};

/// Input for screen creation.
#[derive(Debug, Clone)]
pub struct NewScreen {
    /// Display name, required and unique among live screens.
    pub name: String,
    /// Physical location description.
    pub location: Option<String>,
    /// Initial active state.
    pub active: bool,
    /// Group to join at creation, validated against live groups.
    pub group_id: Option<GroupId>,
    /// Configuration reference; the stock configuration when omitted.
    pub config_id: Option<ConfigId>,
}

impl NewScreen {
    /// A new active, ungrouped screen on the default configuration.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
            active: true,
            group_id: None,
            config_id: None,
        }
    }
}

/// Input for group creation.
#[derive(Debug, Clone)]
pub struct NewGroup {
    /// Display name, required and unique among live groups.
    pub name: String,
    /// Physical location description.
    pub location: Option<String>,
    /// Initial active state.
    pub active: bool,
    /// Configuration reference; the stock configuration when omitted.
    pub config_id: Option<ConfigId>,
}

impl NewGroup {
    /// A new active group on the default configuration.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
            active: true,
            config_id: None,
        }
    }
}

/// Input for configuration creation.
#[derive(Debug, Clone, Default)]
pub struct NewConfiguration {
    /// Descriptive text, required.
    pub description: String,
    /// Style document; the stock document when omitted.
    pub document: Option<StyleDocument>,
}

impl NewConfiguration {
    /// A new configuration with the stock document.
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            document: None,
        }
    }
}

/// Group membership change carried by a screen patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Membership {
    /// Leave membership as it is.
    #[default]
    Keep,
    /// Detach from the current group.
    Leave,
    /// Join the given group.
    Join(GroupId),
}

/// Partial update for a screen. Unset fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct ScreenPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub active: Option<bool>,
    pub membership: Membership,
    pub config_id: Option<ConfigId>,
}

/// Partial update for a group.
#[derive(Debug, Clone, Default)]
pub struct GroupPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub active: Option<bool>,
    pub config_id: Option<ConfigId>,
}

/// Partial update for a configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationPatch {
    pub description: Option<String>,
    pub document: Option<StyleDocument>,
}

/// The entity registry over a fleet store.
pub struct EntityRegistry {
    store: Arc<dyn FleetStore>,
    metrics: Arc<FleetMetrics>,
}

impl EntityRegistry {
    /// Create a registry over the given store.
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self::with_metrics(store, Arc::new(FleetMetrics::new()))
    }

    /// Create a registry sharing a metrics registry.
    pub fn with_metrics(store: Arc<dyn FleetStore>, metrics: Arc<FleetMetrics>) -> Self {
        Self { store, metrics }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn FleetStore> {
        &self.store
    }

    // ------------------------------------------------------------------
    // Configurations
    // ------------------------------------------------------------------

    /// Create a configuration.
    pub fn create_configuration(
        &self,
        ctx: &AuthContext,
        input: NewConfiguration,
    ) -> MarqueeResult<Configuration> {
        ctx.require_authorized()?;
        require_nonempty(EntityKind::Configuration, "description", &input.description)?;

        let configuration = Configuration::new(
            self.store.allocate_configuration_id(),
            input.description,
            input.document.unwrap_or_default(),
        );
        self.store
            .commit(vec![Write::Configuration(configuration.clone())])?;
        tracing::info!(config_id = configuration.id, "configuration created");
        Ok(configuration)
    }

    /// Fetch a live configuration by id.
    pub fn configuration(&self, id: ConfigId) -> MarqueeResult<Configuration> {
        self.store
            .configuration(id)
            .ok_or(MarqueeError::ConfigurationNotFound { config_id: id })
    }

    /// All live configurations.
    pub fn configurations(&self) -> Vec<Configuration> {
        self.store.configurations()
    }

    /// Update a configuration's content fields.
    ///
    /// The commit carries the bump for every live screen and group
    /// referencing this configuration, so pollers observe the new body
    /// and the new version together.
    pub fn update_configuration(
        &self,
        ctx: &AuthContext,
        id: ConfigId,
        patch: ConfigurationPatch,
    ) -> MarqueeResult<Configuration> {
        ctx.require_authorized()?;
        let mut configuration = self.configuration(id)?;

        if let Some(description) = patch.description {
            require_nonempty(EntityKind::Configuration, "description", &description)?;
            configuration.description = description;
        }
        if let Some(document) = patch.document {
            configuration.document = document;
        }

        let mut writes = vec![Write::Configuration(configuration.clone())];
        let bumps = propagation::on_configuration_changed(self.store.as_ref(), id);
        tracing::info!(config_id = id, bumped = bumps.len(), "configuration updated");
        self.metrics.record_propagation_bumps(bumps.len() as u64);
        writes.extend(bumps);
        self.store.commit(writes)?;
        Ok(configuration)
    }

    /// Tombstone a configuration.
    ///
    /// Still-referencing screens keep their dangling id and degrade to
    /// the inactive render result until repointed.
    pub fn delete_configuration(&self, ctx: &AuthContext, id: ConfigId) -> MarqueeResult<()> {
        ctx.require_authorized()?;
        let mut configuration = self.configuration(id)?;
        configuration.tombstone();
        self.store
            .commit(vec![Write::Configuration(configuration)])?;
        tracing::info!(config_id = id, "configuration tombstoned");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Screens
    // ------------------------------------------------------------------

    /// Create a screen. Without an explicit configuration reference the
    /// screen starts on the stock configuration.
    pub fn create_screen(&self, ctx: &AuthContext, input: NewScreen) -> MarqueeResult<Screen> {
        ctx.require_authorized()?;
        require_nonempty(EntityKind::Screen, "name", &input.name)?;
        if self.store.screen_by_name(&input.name).is_some() {
            self.metrics.record_registry_conflict();
            return Err(MarqueeError::DuplicateName {
                kind: EntityKind::Screen,
                name: input.name,
            });
        }

        let config_id = match input.config_id {
            Some(id) => self.require_live_configuration(id)?,
            None => self.default_configuration_id()?,
        };
        if let Some(group_id) = input.group_id {
            self.require_live_group(group_id)?;
        }

        let mut screen = Screen::new(self.store.allocate_screen_id(), input.name, config_id);
        screen.location = input.location;
        screen.active = input.active;
        screen.group_id = input.group_id;

        self.store.commit(vec![Write::Screen(screen.clone())])?;
        tracing::info!(screen_id = screen.id, name = %screen.name, "screen created");
        Ok(screen)
    }

    /// Fetch a live screen by id.
    pub fn screen(&self, id: ScreenId) -> MarqueeResult<Screen> {
        self.store
            .screen(id)
            .ok_or_else(|| MarqueeError::screen_not_found(id))
    }

    /// Fetch a live screen by name.
    pub fn screen_by_name(&self, name: &str) -> MarqueeResult<Screen> {
        self.store
            .screen_by_name(name)
            .ok_or_else(|| MarqueeError::screen_not_found(name))
    }

    /// All live screens.
    pub fn screens(&self) -> Vec<Screen> {
        self.store.screens()
    }

    /// Update a screen's mutable fields, including group membership.
    ///
    /// The screen's own version counter advances by one per committed
    /// edit, identical field values or not.
    pub fn update_screen(
        &self,
        ctx: &AuthContext,
        id: ScreenId,
        patch: ScreenPatch,
    ) -> MarqueeResult<Screen> {
        ctx.require_authorized()?;
        let mut screen = self.screen(id)?;

        if let Some(name) = patch.name {
            require_nonempty(EntityKind::Screen, "name", &name)?;
            if let Some(other) = self.store.screen_by_name(&name) {
                if other.id != id {
                    return Err(MarqueeError::DuplicateName {
                        kind: EntityKind::Screen,
                        name,
                    });
                }
            }
            screen.name = name;
        }
        if let Some(location) = patch.location {
            screen.location = Some(location);
        }
        if let Some(active) = patch.active {
            screen.active = active;
        }
        match patch.membership {
            Membership::Keep => {}
            Membership::Leave => screen.group_id = None,
            Membership::Join(group_id) => {
                self.require_live_group(group_id)?;
                screen.group_id = Some(group_id);
            }
        }
        if let Some(config_id) = patch.config_id {
            screen.config_id = self.require_live_configuration(config_id)?;
        }

        propagation::on_screen_fields_changed(&mut screen);
        self.store.commit(vec![Write::Screen(screen.clone())])?;
        tracing::info!(screen_id = id, config_v = %screen.config_v, "screen updated");
        Ok(screen)
    }

    /// Tombstone a screen. A deleted screen is forced inactive.
    pub fn delete_screen(&self, ctx: &AuthContext, id: ScreenId) -> MarqueeResult<()> {
        ctx.require_authorized()?;
        let mut screen = self.screen(id)?;
        screen.tombstone();
        self.store.commit(vec![Write::Screen(screen)])?;
        tracing::info!(screen_id = id, "screen tombstoned");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    /// Create a group.
    pub fn create_group(&self, ctx: &AuthContext, input: NewGroup) -> MarqueeResult<ScreenGroup> {
        ctx.require_authorized()?;
        require_nonempty(EntityKind::Group, "name", &input.name)?;
        if self.store.group_by_name(&input.name).is_some() {
            self.metrics.record_registry_conflict();
            return Err(MarqueeError::DuplicateName {
                kind: EntityKind::Group,
                name: input.name,
            });
        }

        let config_id = match input.config_id {
            Some(id) => self.require_live_configuration(id)?,
            None => self.default_configuration_id()?,
        };

        let mut group = ScreenGroup::new(self.store.allocate_group_id(), input.name, config_id);
        group.location = input.location;
        group.active = input.active;

        self.store.commit(vec![Write::Group(group.clone())])?;
        tracing::info!(group_id = group.id, name = %group.name, "group created");
        Ok(group)
    }

    /// Fetch a live group by id.
    pub fn group(&self, id: GroupId) -> MarqueeResult<ScreenGroup> {
        self.store
            .group(id)
            .ok_or_else(|| MarqueeError::group_not_found(id))
    }

    /// Fetch a live group by name.
    pub fn group_by_name(&self, name: &str) -> MarqueeResult<ScreenGroup> {
        self.store
            .group_by_name(name)
            .ok_or_else(|| MarqueeError::group_not_found(name))
    }

    /// All live groups.
    pub fn groups(&self) -> Vec<ScreenGroup> {
        self.store.groups()
    }

    /// Update a group's own mutable fields.
    ///
    /// Bumps the group's own counter only. Member screens' stored
    /// counters stay put; pollers of members observe the new group
    /// counter through resolution.
    pub fn update_group(
        &self,
        ctx: &AuthContext,
        id: GroupId,
        patch: GroupPatch,
    ) -> MarqueeResult<ScreenGroup> {
        ctx.require_authorized()?;
        let mut group = self.group(id)?;

        if let Some(name) = patch.name {
            require_nonempty(EntityKind::Group, "name", &name)?;
            if let Some(other) = self.store.group_by_name(&name) {
                if other.id != id {
                    return Err(MarqueeError::DuplicateName {
                        kind: EntityKind::Group,
                        name,
                    });
                }
            }
            group.name = name;
        }
        if let Some(location) = patch.location {
            group.location = Some(location);
        }
        if let Some(active) = patch.active {
            group.active = active;
        }
        if let Some(config_id) = patch.config_id {
            group.config_id = self.require_live_configuration(config_id)?;
        }

        propagation::on_group_fields_changed(&mut group);
        self.store.commit(vec![Write::Group(group.clone())])?;
        tracing::info!(group_id = id, config_v = %group.config_v, "group updated");
        Ok(group)
    }

    /// Tombstone a group and detach its members.
    ///
    /// Members get `group_id = None` and `active = false` in the same
    /// commit as the tombstone, so no screen is ever observed grouped
    /// under a deleted group.
    pub fn delete_group(&self, ctx: &AuthContext, id: GroupId) -> MarqueeResult<()> {
        ctx.require_authorized()?;
        let mut group = self.group(id)?;
        group.tombstone();

        let mut writes = vec![Write::Group(group)];
        let members = self.store.screens_in_group(id);
        let detached = members.len();
        for mut member in members {
            member.detach();
            writes.push(Write::Screen(member));
        }
        self.store.commit(writes)?;
        tracing::info!(group_id = id, detached, "group tombstoned");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reference checks
    // ------------------------------------------------------------------

    /// The configuration screens and groups fall back to when created
    /// without an explicit reference: the oldest live configuration.
    pub fn default_configuration_id(&self) -> MarqueeResult<ConfigId> {
        self.store
            .configurations()
            .first()
            .map(|c| c.id)
            .ok_or_else(|| MarqueeError::Referential {
                kind: EntityKind::Configuration,
                reference: "no live configuration available".to_string(),
            })
    }

    fn require_live_configuration(&self, id: ConfigId) -> MarqueeResult<ConfigId> {
        if self.store.configuration(id).is_some() {
            Ok(id)
        } else {
            Err(MarqueeError::Referential {
                kind: EntityKind::Configuration,
                reference: id.to_string(),
            })
        }
    }

    fn require_live_group(&self, id: GroupId) -> MarqueeResult<GroupId> {
        if self.store.group(id).is_some() {
            Ok(id)
        } else {
            Err(MarqueeError::Referential {
                kind: EntityKind::Group,
                reference: id.to_string(),
            })
        }
    }
}

fn require_nonempty(kind: EntityKind, field: &str, value: &str) -> MarqueeResult<()> {
    if value.trim().is_empty() {
        Err(MarqueeError::validation(kind, format!("{field} is required")))
    } else {
        Ok(())
    }
}
