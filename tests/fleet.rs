//! Tests for the fleet registry and version propagation.

mod common;

use common::admin;
use marquee::core::auth::AuthContext;
use marquee::core::config::Config;
use marquee::core::error::MarqueeError;
use marquee::fleet::bootstrap;
use marquee::fleet::configuration::{ColumnPanel, FixedPanel, StyleDocument};
use marquee::fleet::registry::{
    ConfigurationPatch, GroupPatch, Membership, NewConfiguration, NewGroup, NewScreen,
    ScreenPatch,
};
use marquee::fleet::screen::Screen;
use marquee::fleet::version::ConfigVersion;
use marquee::store::memory::MemoryStore;
use marquee::store::{ConfigurationRepository, FleetStore, ScreenRepository};
use std::sync::Arc;

// ============================================================================
// Screen CRUD
// ============================================================================

#[test]
fn create_screen_uses_stock_configuration() {
    let (_, registry, _, stock_id) = common::bootstrapped_fleet();

    let screen = registry.create_screen(&admin(), NewScreen::named("lobby")).unwrap();
    assert_eq!(screen.config_id, stock_id);
    assert_eq!(screen.config_v, ConfigVersion::initial());
    assert!(screen.active);
    assert!(screen.group_id.is_none());
}

#[test]
fn create_screen_requires_name() {
    let (_, registry, _, _) = common::bootstrapped_fleet();

    let result = registry.create_screen(&admin(), NewScreen::named("  "));
    assert!(matches!(result, Err(MarqueeError::Validation { .. })));
}

#[test]
fn duplicate_screen_name_conflicts() {
    let (_, registry, _, _) = common::bootstrapped_fleet();

    registry.create_screen(&admin(), NewScreen::named("lobby")).unwrap();
    let result = registry.create_screen(&admin(), NewScreen::named("lobby"));
    assert!(matches!(result, Err(MarqueeError::DuplicateName { .. })));
}

#[test]
fn create_screen_rejects_dangling_references() {
    let (_, registry, _, _) = common::bootstrapped_fleet();

    let mut input = NewScreen::named("lobby");
    input.config_id = Some(999);
    assert!(matches!(
        registry.create_screen(&admin(), input),
        Err(MarqueeError::Referential { .. })
    ));

    let mut input = NewScreen::named("lobby");
    input.group_id = Some(999);
    assert!(matches!(
        registry.create_screen(&admin(), input),
        Err(MarqueeError::Referential { .. })
    ));
}

#[test]
fn unauthenticated_mutations_are_rejected() {
    let (_, registry, _, _) = common::bootstrapped_fleet();

    let result = registry.create_screen(&AuthContext::anonymous(), NewScreen::named("lobby"));
    assert!(matches!(result, Err(MarqueeError::Unauthenticated)));
    assert!(registry.screens().is_empty());
}

#[test]
fn deleted_screen_is_hidden_from_lookups() {
    let (_, registry, _, _) = common::bootstrapped_fleet();

    let screen = registry.create_screen(&admin(), NewScreen::named("lobby")).unwrap();
    registry.delete_screen(&admin(), screen.id).unwrap();

    assert!(matches!(
        registry.screen(screen.id),
        Err(MarqueeError::ScreenNotFound { .. })
    ));
    assert!(registry.screen_by_name("lobby").is_err());
    assert!(registry.screens().is_empty());

    // The freed name can be reused by a new screen.
    registry.create_screen(&admin(), NewScreen::named("lobby")).unwrap();
}

#[test]
fn tombstone_forces_screen_inactive() {
    let mut screen = Screen::new(1, "lobby", 1);
    assert!(screen.active);
    screen.tombstone();
    assert!(screen.deleted);
    assert!(!screen.active);
}

// ============================================================================
// Version propagation
// ============================================================================

#[test]
fn screen_update_bumps_own_version_by_one() {
    let (_, registry, _, _) = common::bootstrapped_fleet();

    let screen = registry.create_screen(&admin(), NewScreen::named("lobby")).unwrap();
    assert_eq!(screen.config_v.get(), 1);

    let patch = ScreenPatch {
        location: Some("entrance hall".to_string()),
        ..ScreenPatch::default()
    };
    let updated = registry.update_screen(&admin(), screen.id, patch.clone()).unwrap();
    assert_eq!(updated.config_v.get(), 2);

    // Re-applying identical field values still advances the counter.
    let updated = registry.update_screen(&admin(), screen.id, patch).unwrap();
    assert_eq!(updated.config_v.get(), 3);
}

#[test]
fn configuration_update_bumps_every_referencer_exactly_once() {
    let (_, registry, _, stock_id) = common::bootstrapped_fleet();

    let other = registry
        .create_configuration(&admin(), NewConfiguration::described("side hall style"))
        .unwrap();

    let a = registry.create_screen(&admin(), NewScreen::named("lobby")).unwrap();
    let b = registry.create_screen(&admin(), NewScreen::named("cafeteria")).unwrap();
    let group = registry.create_group(&admin(), NewGroup::named("floor2")).unwrap();
    let mut bystander_input = NewScreen::named("annex");
    bystander_input.config_id = Some(other.id);
    let bystander = registry.create_screen(&admin(), bystander_input).unwrap();

    registry
        .update_configuration(&admin(), stock_id, ConfigurationPatch::default())
        .unwrap();

    assert_eq!(registry.screen(a.id).unwrap().config_v.get(), 2);
    assert_eq!(registry.screen(b.id).unwrap().config_v.get(), 2);
    assert_eq!(registry.group(group.id).unwrap().config_v.get(), 2);
    assert_eq!(registry.screen(bystander.id).unwrap().config_v.get(), 1);
}

#[test]
fn group_update_does_not_bump_member_counters() {
    let (_, registry, _, _) = common::bootstrapped_fleet();

    let group = registry.create_group(&admin(), NewGroup::named("floor2")).unwrap();
    let mut input = NewScreen::named("meeting-room");
    input.group_id = Some(group.id);
    let member = registry.create_screen(&admin(), input).unwrap();

    let patch = GroupPatch {
        location: Some("second floor".to_string()),
        ..GroupPatch::default()
    };
    let updated = registry.update_group(&admin(), group.id, patch).unwrap();

    assert_eq!(updated.config_v.get(), 2);
    assert_eq!(registry.screen(member.id).unwrap().config_v.get(), 1);
}

#[test]
fn membership_change_bumps_only_the_screen() {
    let (_, registry, _, _) = common::bootstrapped_fleet();

    let group = registry.create_group(&admin(), NewGroup::named("floor2")).unwrap();
    let screen = registry.create_screen(&admin(), NewScreen::named("lobby")).unwrap();

    let patch = ScreenPatch {
        membership: Membership::Join(group.id),
        ..ScreenPatch::default()
    };
    let joined = registry.update_screen(&admin(), screen.id, patch).unwrap();
    assert_eq!(joined.group_id, Some(group.id));
    assert_eq!(joined.config_v.get(), 2);
    assert_eq!(registry.group(group.id).unwrap().config_v.get(), 1);

    let patch = ScreenPatch {
        membership: Membership::Leave,
        ..ScreenPatch::default()
    };
    let left = registry.update_screen(&admin(), screen.id, patch).unwrap();
    assert!(left.group_id.is_none());
    assert_eq!(left.config_v.get(), 3);
}

// ============================================================================
// Group cascade
// ============================================================================

#[test]
fn deleting_group_detaches_and_deactivates_members() {
    let (store, registry, _, _) = common::bootstrapped_fleet();

    let group = registry.create_group(&admin(), NewGroup::named("floor2")).unwrap();
    let mut input = NewScreen::named("meeting-room");
    input.group_id = Some(group.id);
    let member = registry.create_screen(&admin(), input).unwrap();
    let loner = registry.create_screen(&admin(), NewScreen::named("lobby")).unwrap();

    registry.delete_group(&admin(), group.id).unwrap();

    assert!(registry.group(group.id).is_err());
    assert!(registry.group_by_name("floor2").is_err());

    let member = registry.screen(member.id).unwrap();
    assert!(member.group_id.is_none());
    assert!(!member.active);

    // Unrelated screens are untouched.
    let loner = registry.screen(loner.id).unwrap();
    assert!(loner.active);

    assert!(store.screens_in_group(group.id).is_empty());
}

#[test]
fn deleting_group_leaves_member_counters_alone() {
    let (_, registry, _, _) = common::bootstrapped_fleet();

    let group = registry.create_group(&admin(), NewGroup::named("floor2")).unwrap();
    let mut input = NewScreen::named("meeting-room");
    input.group_id = Some(group.id);
    let member = registry.create_screen(&admin(), input).unwrap();

    registry.delete_group(&admin(), group.id).unwrap();
    assert_eq!(registry.screen(member.id).unwrap().config_v.get(), 1);
}

// ============================================================================
// Configurations
// ============================================================================

#[test]
fn configuration_crud_roundtrip() {
    let (_, registry, _, _) = common::bootstrapped_fleet();

    let mut input = NewConfiguration::described("cafeteria menu");
    let mut document = StyleDocument::standard();
    document.head.bg_color = "#000".to_string();
    document
        .body
        .content
        .fixed_content
        .push(FixedPanel::announcement("Meeting at 10, room 210A"));
    document
        .body
        .content
        .columns
        .push(ColumnPanel::html("<h1>Today</h1><p>Specials below.</p>"));
    input.document = Some(document);

    let created = registry.create_configuration(&admin(), input).unwrap();
    assert_eq!(created.document.head.bg_color, "#000");
    assert_eq!(created.document.body.content.fixed_content.len(), 1);
    assert_eq!(
        created.document.body.content.columns[0].border_color,
        "#fff"
    );

    let patch = ConfigurationPatch {
        description: Some("cafeteria menu v2".to_string()),
        ..ConfigurationPatch::default()
    };
    let updated = registry.update_configuration(&admin(), created.id, patch).unwrap();
    assert_eq!(updated.description, "cafeteria menu v2");

    registry.delete_configuration(&admin(), created.id).unwrap();
    assert!(matches!(
        registry.configuration(created.id),
        Err(MarqueeError::ConfigurationNotFound { .. })
    ));
}

#[test]
fn screens_fall_back_to_oldest_live_configuration() {
    let (_, registry, _, stock_id) = common::bootstrapped_fleet();

    let newer = registry
        .create_configuration(&admin(), NewConfiguration::described("newer"))
        .unwrap();
    let screen = registry.create_screen(&admin(), NewScreen::named("lobby")).unwrap();
    assert_eq!(screen.config_id, stock_id);

    registry.delete_configuration(&admin(), stock_id).unwrap();
    let second = registry.create_screen(&admin(), NewScreen::named("hall")).unwrap();
    assert_eq!(second.config_id, newer.id);
}

#[test]
fn screen_creation_fails_with_no_live_configuration() {
    let (_, registry, _, stock_id) = common::bootstrapped_fleet();

    registry.delete_configuration(&admin(), stock_id).unwrap();
    let result = registry.create_screen(&admin(), NewScreen::named("lobby"));
    assert!(matches!(result, Err(MarqueeError::Referential { .. })));
}

// ============================================================================
// Bootstrap
// ============================================================================

#[test]
fn bootstrap_runs_idempotently() {
    let store: Arc<dyn FleetStore> = Arc::new(MemoryStore::new());
    let config = Config::default();

    let first = bootstrap::run(&store, &config).unwrap();
    assert!(first.created_stock_configuration);

    let second = bootstrap::run(&store, &config).unwrap();
    assert!(!second.created_stock_configuration);
    assert_eq!(second.default_config_id, first.default_config_id);
    assert_eq!(store.configurations().len(), 1);
}

#[test]
fn bootstrap_rejects_unknown_fixture_group() {
    let store: Arc<dyn FleetStore> = Arc::new(MemoryStore::new());
    let config = Config::from_toml(
        r#"
[[bootstrap.screens]]
name = "lobby"
group = "missing"
"#,
    )
    .unwrap();

    assert!(matches!(
        bootstrap::run(&store, &config),
        Err(MarqueeError::Referential { .. })
    ));
}

#[test]
fn bootstrap_reconciles_fixture_membership() {
    let store: Arc<dyn FleetStore> = Arc::new(MemoryStore::new());

    let plain = Config::from_toml(
        r#"
[[bootstrap.screens]]
name = "lobby"
"#,
    )
    .unwrap();
    bootstrap::run(&store, &plain).unwrap();

    let grouped = Config::from_toml(
        r#"
[[bootstrap.groups]]
name = "floor2"

[[bootstrap.screens]]
name = "lobby"
group = "floor2"
"#,
    )
    .unwrap();
    let report = bootstrap::run(&store, &grouped).unwrap();
    assert_eq!(report.seeded_screens, 0);

    let registry = marquee::fleet::registry::EntityRegistry::new(Arc::clone(&store));
    let group = registry.group_by_name("floor2").unwrap();
    assert_eq!(
        registry.screen_by_name("lobby").unwrap().group_id,
        Some(group.id)
    );
}
