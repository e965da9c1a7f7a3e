//! Common test utilities for integration tests.
//!
//! This module provides fixtures for building configuration payloads,
//! command messages and a running controller over temporary stores.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use edge_sqlite::dispatch::{BusMessage, InboundCommand, MemorySink, OutboundResult};
use edge_sqlite::{ConnectionManager, Dispatcher, ReconfigurationController};
use serde_json::{json, Map, Value};
use tempfile::TempDir;

/// A temporary directory holding the stores of one test.
pub struct TestStores {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Root of the temporary directory.
    pub root: PathBuf,
}

#[allow(dead_code)]
impl TestStores {
    /// Creates an empty store directory.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    /// Path of the store file `name` inside the directory.
    pub fn path(&self, name: &str) -> String {
        self.root.join(name).to_string_lossy().into_owned()
    }

    /// A fallback file location that does not exist.
    pub fn missing_fallback(&self) -> PathBuf {
        self.root.join("no-fallback.json")
    }

    /// Writes `payload` as the fallback file and returns its path.
    pub fn write_fallback(&self, payload: &Value) -> PathBuf {
        let path = self.root.join("fallback.json");
        std::fs::write(&path, payload.to_string()).expect("Failed to write fallback");
        path
    }
}

/// The `{Id INTEGER key not null, Value TEXT}` table definition.
#[allow(dead_code)]
pub fn key_value_table(name: &str) -> Value {
    json!({
        "TableName": name,
        "id": {"ColumnName": "Id", "Type": "INTEGER", "IsKey": true, "NotNull": true},
        "value": {"ColumnName": "Value", "Type": "TEXT"}
    })
}

/// A payload with one database per `(alias, path, tables)` entry.
#[allow(dead_code)]
pub fn payload(databases: &[(&str, &str, &[&str])]) -> Value {
    let mut root = Map::new();
    root.insert("$version".into(), json!(1));
    for (alias, path, tables) in databases {
        let mut database = Map::new();
        database.insert("DbPath".into(), json!(path));
        for table in *tables {
            database.insert(format!("{table}_alias"), key_value_table(table));
        }
        root.insert((*alias).to_string(), Value::Object(database));
    }
    json!({ "SQLiteConfigs": root })
}

/// A command message addressed to the store at `db_name`.
#[allow(dead_code)]
pub fn command(request_id: i64, db_name: &str, sql: &str) -> BusMessage {
    BusMessage::command(&InboundCommand {
        request_id,
        request_module: "test-module".into(),
        db_name: db_name.into(),
        command: sql.into(),
    })
    .expect("Failed to encode command")
}

/// Decodes every result published to `sink`, draining it.
#[allow(dead_code)]
pub fn take_results(sink: &MemorySink) -> Vec<OutboundResult> {
    sink.take()
        .into_iter()
        .map(|(_, message)| serde_json::from_str(&message.body).expect("Invalid result body"))
        .collect()
}

/// A controller over a fresh dispatcher publishing into a memory sink.
#[allow(dead_code)]
pub fn controller(fallback: &Path) -> (ReconfigurationController, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let dispatcher = Arc::new(Dispatcher::new(sink.clone()));
    let controller =
        ReconfigurationController::new(dispatcher, ConnectionManager::default(), fallback);
    (controller, sink)
}
