//! Integration tests for runtime reconfiguration.

mod common;

use std::sync::Arc;

use common::{command, controller, payload, take_results, TestStores};
use edge_sqlite::dispatch::DropReason;
use edge_sqlite::{Disposition, Error, Lifecycle};
use serde_json::json;

// ============================================================================
// Degrading to inert
// ============================================================================

#[test]
fn test_invalid_change_discards_until_recovery() {
    let stores = TestStores::new();
    let path = stores.path("inert.db");
    let (controller, sink) = controller(&stores.missing_fallback());
    controller
        .start(Some(&payload(&[("db", &path, &["t"])])))
        .unwrap();

    // Missing DbPath
    let invalid = json!({"SQLiteConfigs": {"db": {"t": {"TableName": "t"}}}});
    let err = controller.on_configuration_change(&invalid).unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration { .. }));
    assert_eq!(controller.lifecycle(), Lifecycle::Inert);

    for id in 0..3 {
        assert_eq!(
            controller.dispatcher().handle(&command(id, &path, "SELECT 1")),
            Disposition::Dropped(DropReason::NotServing)
        );
    }
    assert!(sink.is_empty());

    controller
        .on_configuration_change(&payload(&[("db", &path, &["t"])]))
        .unwrap();
    assert_eq!(controller.lifecycle(), Lifecycle::Active);
    assert_eq!(
        controller.dispatcher().handle(&command(9, &path, "SELECT 1")),
        Disposition::Published
    );
    assert_eq!(take_results(&sink)[0].request_id, 9);
}

#[test]
fn test_change_without_root_uses_fallback_file() {
    let stores = TestStores::new();
    let pushed = stores.path("pushed.db");
    let local = stores.path("local.db");
    let fallback = stores.write_fallback(&payload(&[("local", &local, &["t"])]));

    let (controller, _sink) = controller(&fallback);
    controller
        .start(Some(&payload(&[("pushed", &pushed, &["t"])])))
        .unwrap();

    controller
        .on_configuration_change(&json!({"$version": 7}))
        .unwrap();

    let state = controller.dispatcher().current().unwrap();
    assert_eq!(state.paths(), vec![local.as_str()]);
}

#[test]
fn test_fallback_also_invalid_goes_inert() {
    let stores = TestStores::new();
    let fallback = stores.write_fallback(&json!({"SQLiteConfigs": {"db": {}}}));

    let (controller, _sink) = controller(&fallback);
    let err = controller.start(None).unwrap_err();
    assert!(err.is_configuration_error());
    assert_eq!(controller.lifecycle(), Lifecycle::Inert);
    assert!(!controller.dispatcher().is_serving());
}

#[test]
fn test_duplicate_paths_are_rejected() {
    let stores = TestStores::new();
    let path = stores.path("same.db");
    let (controller, _sink) = controller(&stores.missing_fallback());

    let err = controller
        .start(Some(&payload(&[("a", &path, &["t"]), ("b", &path, &["u"])])))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration { .. }));
    assert_eq!(controller.lifecycle(), Lifecycle::Inert);
}

// ============================================================================
// Replacing the active state
// ============================================================================

#[test]
fn test_new_generation_replaces_store_set() {
    let stores = TestStores::new();
    let first = stores.path("first.db");
    let second = stores.path("second.db");
    let (controller, _sink) = controller(&stores.missing_fallback());

    assert_eq!(
        controller
            .start(Some(&payload(&[("db", &first, &["t"])])))
            .unwrap(),
        1
    );
    assert_eq!(
        controller
            .on_configuration_change(&payload(&[("db", &second, &["t"])]))
            .unwrap(),
        2
    );

    let dispatcher = controller.dispatcher();
    assert_eq!(
        dispatcher.handle(&command(1, &first, "SELECT 1")),
        Disposition::Dropped(DropReason::UnknownDatabase)
    );
    assert_eq!(
        dispatcher.handle(&command(2, &second, "SELECT 1")),
        Disposition::Published
    );
}

#[test]
fn test_in_flight_snapshot_outlives_reconfiguration() {
    let stores = TestStores::new();
    let old_path = stores.path("old.db");
    let new_path = stores.path("new.db");
    let (controller, sink) = controller(&stores.missing_fallback());
    controller
        .start(Some(&payload(&[("db", &old_path, &["t"])])))
        .unwrap();

    let snapshot = controller.dispatcher().current().unwrap();
    let retired = Arc::downgrade(&snapshot);

    controller
        .on_configuration_change(&payload(&[("db", &new_path, &["t"])]))
        .unwrap();
    assert_eq!(controller.dispatcher().current().unwrap().generation(), 2);

    // The borrowed generation still serves its own stores
    assert_eq!(
        controller
            .dispatcher()
            .dispatch_on(Some(&snapshot), &command(5, &old_path, "SELECT 'late'")),
        Disposition::Published
    );
    assert_eq!(take_results(&sink)[0].rows, vec![vec!["late".to_string()]]);

    drop(snapshot);
    assert!(retired.upgrade().is_none());
}
