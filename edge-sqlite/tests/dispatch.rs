//! Integration tests for command dispatch and result publication.

mod common;

use std::sync::Arc;

use chrono::NaiveDateTime;
use common::{command, controller, payload, take_results, TestStores};
use edge_sqlite::dispatch::{
    BusMessage, DropReason, COMMAND_TYPE_PROPERTY, CONTENT_TYPE_PROPERTY, DEFAULT_OUTPUT,
    RESULT_CONTENT_TYPE, SQLITE_COMMAND, TIMESTAMP_FORMAT,
};
use edge_sqlite::{Disposition, MemorySink, ReconfigurationController};

fn active(stores: &TestStores, path: &str) -> (ReconfigurationController, Arc<MemorySink>) {
    let (controller, sink) = controller(&stores.missing_fallback());
    controller
        .start(Some(&payload(&[("db", path, &["t"])])))
        .unwrap();
    (controller, sink)
}

// ============================================================================
// Results
// ============================================================================

#[test]
fn test_select_publishes_rows_in_order() {
    let stores = TestStores::new();
    let path = stores.path("rows.db");
    let (controller, sink) = active(&stores, &path);
    let dispatcher = controller.dispatcher();

    assert_eq!(
        dispatcher.handle(&command(
            1,
            &path,
            "INSERT INTO t VALUES (2, 'b'); INSERT INTO t VALUES (1, 'a'); INSERT INTO t VALUES (3, NULL)"
        )),
        Disposition::Empty
    );
    assert!(sink.is_empty());

    assert_eq!(
        dispatcher.handle(&command(77, &path, "SELECT Id, Value FROM t ORDER BY Id")),
        Disposition::Published
    );

    let sent = sink.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, DEFAULT_OUTPUT);
    assert_eq!(
        sent[0].1.property(CONTENT_TYPE_PROPERTY),
        Some(RESULT_CONTENT_TYPE)
    );

    let results = take_results(&sink);
    assert_eq!(results[0].request_id, 77);
    assert_eq!(results[0].request_module, "test-module");
    assert_eq!(
        results[0].rows,
        vec![
            vec!["1".to_string(), "a".to_string()],
            vec!["2".to_string(), "b".to_string()],
            vec!["3".to_string(), "NULL".to_string()],
        ]
    );
    assert!(NaiveDateTime::parse_from_str(&results[0].publish_timestamp, TIMESTAMP_FORMAT).is_ok());
}

#[test]
fn test_each_command_gets_its_own_result() {
    let stores = TestStores::new();
    let path = stores.path("many.db");
    let (controller, sink) = active(&stores, &path);

    for id in 1..=5 {
        controller
            .dispatcher()
            .handle(&command(id, &path, &format!("SELECT {id} * 10")));
    }

    let results = take_results(&sink);
    let ids: Vec<i64> = results.iter().map(|r| r.request_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(results[2].rows, vec![vec!["30".to_string()]]);
}

#[test]
fn test_writes_are_durable() {
    let stores = TestStores::new();
    let path = stores.path("durable.db");
    {
        let (controller, _sink) = active(&stores, &path);
        controller
            .dispatcher()
            .handle(&command(1, &path, "INSERT INTO t VALUES (1, 'stays')"));
    }

    let (controller, sink) = active(&stores, &path);
    controller
        .dispatcher()
        .handle(&command(2, &path, "SELECT Value FROM t"));
    assert_eq!(take_results(&sink)[0].rows, vec![vec!["stays".to_string()]]);
}

// ============================================================================
// Drops and failures
// ============================================================================

#[test]
fn test_unroutable_messages_are_dropped_silently() {
    let stores = TestStores::new();
    let path = stores.path("drops.db");
    let (controller, sink) = active(&stores, &path);
    let dispatcher = controller.dispatcher();

    let other_kind = BusMessage::new("{}").with_property(COMMAND_TYPE_PROPERTY, "Other");
    assert_eq!(
        dispatcher.handle(&other_kind),
        Disposition::Dropped(DropReason::UnrecognizedKind)
    );

    let untyped = BusMessage::new("{}");
    assert_eq!(
        dispatcher.handle(&untyped),
        Disposition::Dropped(DropReason::UnrecognizedKind)
    );

    let malformed = BusMessage::new("not json").with_property(COMMAND_TYPE_PROPERTY, SQLITE_COMMAND);
    assert_eq!(
        dispatcher.handle(&malformed),
        Disposition::Dropped(DropReason::MalformedBody)
    );

    let unknown = stores.path("elsewhere.db");
    assert_eq!(
        dispatcher.handle(&command(1, &unknown, "SELECT 1")),
        Disposition::Dropped(DropReason::UnknownDatabase)
    );
    assert!(!std::path::Path::new(&unknown).exists());

    assert!(sink.is_empty());
    assert_eq!(dispatcher.messages_received(), 4);
}

#[test]
fn test_failed_statement_publishes_nothing_and_rolls_back() {
    let stores = TestStores::new();
    let path = stores.path("fail.db");
    let (controller, sink) = active(&stores, &path);
    let dispatcher = controller.dispatcher();

    let outcome = dispatcher.handle(&command(
        1,
        &path,
        "INSERT INTO t VALUES (1, 'a'); INSERT INTO missing VALUES (1)",
    ));
    assert!(matches!(outcome, Disposition::Failed(_)));
    assert!(sink.is_empty());

    dispatcher.handle(&command(2, &path, "SELECT COUNT(*) FROM t"));
    assert_eq!(take_results(&sink)[0].rows, vec![vec!["0".to_string()]]);
}

#[test]
fn test_messages_before_start_are_discarded() {
    let stores = TestStores::new();
    let (controller, sink) = controller(&stores.missing_fallback());

    assert_eq!(
        controller
            .dispatcher()
            .handle(&command(1, &stores.path("x.db"), "SELECT 1")),
        Disposition::Dropped(DropReason::NotServing)
    );
    assert!(sink.is_empty());
}
