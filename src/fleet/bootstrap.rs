//! Startup bootstrap.
//!
//! Runs once at service start and is idempotent: it ensures a stock
//! configuration exists for screens created without an explicit
//! reference, then creates any `[bootstrap]` fixture groups and screens
//! that are not already present. Creating defaults here keeps write side
//! effects out of read and construct paths.

use std::sync::Arc;

use crate::core::auth::AuthContext;
use crate::core::config::Config;
use crate::core::error::{EntityKind, MarqueeError, MarqueeResult};
use crate::fleet::configuration::{ConfigId, Configuration, StyleDocument};
use crate::fleet::registry::{EntityRegistry, Membership, NewGroup, NewScreen, ScreenPatch};
use crate::store::{
    ConfigurationRepository, FleetStore, GroupRepository, ScreenRepository, Write,
};

/// What the bootstrap found or created.
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    /// The configuration used as the creation default.
    pub default_config_id: ConfigId,
    /// Whether the stock configuration was created on this run.
    pub created_stock_configuration: bool,
    /// Fixture groups created on this run.
    pub seeded_groups: usize,
    /// Fixture screens created on this run.
    pub seeded_screens: usize,
}

/// Run the bootstrap against a store.
pub fn run(store: &Arc<dyn FleetStore>, config: &Config) -> MarqueeResult<BootstrapReport> {
    let registry = EntityRegistry::new(Arc::clone(store));
    // Fixture creation acts as the service itself, not a logged-in user.
    let ctx = AuthContext::service();

    let (default_config_id, created_stock_configuration) = match store.configurations().first() {
        Some(existing) => (existing.id, false),
        None => {
            let stock = Configuration::new(
                store.allocate_configuration_id(),
                config.fleet.default_config_description.clone(),
                StyleDocument::standard(),
            );
            store.commit(vec![Write::Configuration(stock.clone())])?;
            tracing::info!(config_id = stock.id, "stock configuration created");
            (stock.id, true)
        }
    };

    let mut seeded_groups = 0;
    for seed in &config.bootstrap.groups {
        if store.group_by_name(&seed.name).is_some() {
            continue;
        }
        let mut input = NewGroup::named(seed.name.clone());
        input.location = seed.location.clone();
        input.active = seed.active;
        registry.create_group(&ctx, input)?;
        seeded_groups += 1;
    }

    let mut seeded_screens = 0;
    for seed in &config.bootstrap.screens {
        let group_id = match &seed.group {
            Some(group_name) => Some(
                registry
                    .group_by_name(group_name)
                    .map_err(|_| MarqueeError::Referential {
                        kind: EntityKind::Group,
                        reference: group_name.clone(),
                    })?
                    .id,
            ),
            None => None,
        };
        match store.screen_by_name(&seed.name) {
            Some(existing) => {
                // Re-running with an edited fixture group reconciles membership.
                if let Some(group_id) = group_id {
                    if existing.group_id != Some(group_id) {
                        let patch = ScreenPatch {
                            membership: Membership::Join(group_id),
                            ..ScreenPatch::default()
                        };
                        registry.update_screen(&ctx, existing.id, patch)?;
                    }
                }
            }
            None => {
                let mut input = NewScreen::named(seed.name.clone());
                input.location = seed.location.clone();
                input.active = seed.active;
                input.group_id = group_id;
                registry.create_screen(&ctx, input)?;
                seeded_screens += 1;
            }
        }
    }

    if seeded_groups > 0 || seeded_screens > 0 {
        tracing::info!(seeded_groups, seeded_screens, "bootstrap fixtures created");
    }

    Ok(BootstrapReport {
        default_config_id,
        created_stock_configuration,
        seeded_groups,
        seeded_screens,
    })
}
