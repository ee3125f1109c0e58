//! Version propagation hooks.
//!
//! Polling screens detect staleness by comparing version counters, so
//! every rendering-relevant mutation must move the right counters:
//!
//! - A configuration content change bumps `config_v` on every live screen
//!   and group referencing it (BUMP-FANOUT), each by exactly one.
//! - A screen or group field change bumps only that entity's own counter.
//!   Group field changes do not cascade into member screens' stored
//!   counters; members inherit the group counter at resolve time.
//! - Group membership changes need no extra bump: resolution switches
//!   which counter it reads, so the effective version a poller observes
//!   changes on its own.
//!
//! The hooks return or mutate rows for the caller to include in the same
//! commit as the triggering mutation. A bump must never land without its
//! mutation, nor the mutation without its bumps.

use crate::fleet::configuration::ConfigId;
use crate::fleet::group::ScreenGroup;
use crate::fleet::screen::Screen;
use crate::store::{FleetStore, GroupRepository, ScreenRepository, Write};

/// Build the bump write set for a configuration content change.
///
/// Every live screen and group referencing `config_id` gets its counter
/// advanced by exactly one. Entities referencing other configurations are
/// untouched. The caller commits these writes together with the updated
/// configuration row.
pub fn on_configuration_changed(store: &dyn FleetStore, config_id: ConfigId) -> Vec<Write> {
    let mut writes = Vec::new();
    for mut screen in store.screens_referencing(config_id) {
        screen.config_v = screen.config_v.bump();
        writes.push(Write::Screen(screen));
    }
    for mut group in store.groups_referencing(config_id) {
        group.config_v = group.config_v.bump();
        writes.push(Write::Group(group));
    }
    writes
}

/// Bump a screen's own counter after its mutable fields changed.
///
/// Applied unconditionally per committed edit: re-submitting identical
/// field values still advances the counter.
pub fn on_screen_fields_changed(screen: &mut Screen) {
    screen.config_v = screen.config_v.bump();
}

/// Bump a group's own counter after its mutable fields changed.
///
/// Member screens' stored counters are deliberately left alone; pollers
/// of member screens observe the new group counter through resolution.
pub fn on_group_fields_changed(group: &mut ScreenGroup) {
    group.config_v = group.config_v.bump();
}
