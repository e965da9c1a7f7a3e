//! Shared test utilities for database unit tests.

use tempfile::TempDir;

use crate::config::{Column, Table};
use crate::database::{DatabaseConfig, StoreConnection};

/// Builds a column with both name and type set.
#[must_use]
pub fn column(name: &str, sql_type: &str, is_key: bool, not_null: bool) -> Column {
    Column {
        alias: name.to_lowercase(),
        name: Some(name.into()),
        sql_type: Some(sql_type.into()),
        is_key,
        not_null,
    }
}

/// The `t (Id INTEGER key not null, Value TEXT)` table used across tests.
#[must_use]
pub fn key_value_table() -> Table {
    Table {
        alias: "t".into(),
        name: Some("t".into()),
        columns: vec![
            column("Id", "INTEGER", true, true),
            column("Value", "TEXT", false, false),
        ],
    }
}

/// Opens a store in a fresh temporary directory holding [`key_value_table`].
///
/// The directory must outlive the store, so both are returned.
///
/// # Panics
///
/// Panics if the directory or store cannot be created.
#[must_use]
pub fn temp_store() -> (TempDir, StoreConnection) {
    let dir = tempfile::tempdir().unwrap();
    let store = StoreConnection::open(&DatabaseConfig::new(dir.path().join("test.db"))).unwrap();
    store.create_table(&key_value_table()).unwrap();
    (dir, store)
}
