//! Store layer: connections, DDL and activation.
//!
//! This module turns a validated [`Configuration`](crate::config::Configuration)
//! into live store handles:
//! - [`ConnectionManager`] opens one store per database and creates its tables
//! - [`StoreConnection`] executes commands under a per-connection mutex
//! - [`ActiveState`] is the immutable, path-keyed set of handles published
//!   to the dispatcher
//!
//! # Examples
//!
//! ```
//! use edge_sqlite::config::ConfigParser;
//! use edge_sqlite::database::ConnectionManager;
//! use std::time::Duration;
//!
//! let config = ConfigParser::parse_str(r#"{"SQLiteConfigs": {"db": {"DbPath": ":memory:",
//!     "t": {"TableName": "t", "v": {"ColumnName": "V", "Type": "TEXT"}}}}}"#).unwrap();
//! let state = ConnectionManager::default().activate(&config, 1);
//!
//! let store = state.connection(":memory:").unwrap();
//! store.execute("INSERT INTO t VALUES ('x')", Duration::from_secs(1)).unwrap();
//! let rows = store.execute("SELECT V FROM t", Duration::from_secs(1)).unwrap();
//! assert_eq!(rows, vec![vec!["x".to_string()]]);
//! ```

mod config;
mod connection;
mod manager;
mod schema;
mod state;

#[cfg(test)]
pub(crate) mod test_util;

#[cfg(test)]
mod proptests;

pub use config::{DatabaseConfig, DEFAULT_BUSY_TIMEOUT, MEMORY_PATH};
pub use connection::{Rows, StoreConnection, NULL_TEXT};
pub use manager::ConnectionManager;
pub use schema::{create_table_sql, table_columns, table_exists, ColumnInfo};
pub use state::ActiveState;
