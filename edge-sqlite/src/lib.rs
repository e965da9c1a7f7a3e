#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # edge-sqlite
//!
//! A message-driven bridge between a message bus and local `SQLite` stores.
//!
//! Commands arrive as bus messages naming a store path and the SQL to run
//! there. Result rows are republished as JSON. The set of stores, their
//! tables and column schemas come from a nested configuration that can be
//! replaced at runtime without dropping in-flight work.
//!
//! ## Core Types
//!
//! - [`config::ConfigParser`] and [`config::ConfigValidator`]: the store configuration tree
//! - [`database::ConnectionManager`] and [`database::ActiveState`]: live store handles
//! - [`dispatch::Dispatcher`]: command routing and result publication
//! - [`reconfigure::ReconfigurationController`]: the validate/activate/degrade lifecycle
//! - [`settings::SettingsBuilder`]: runtime settings of the module
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use edge_sqlite::dispatch::{BusMessage, InboundCommand, MemorySink};
//! use edge_sqlite::reconfigure::ReconfigurationController;
//! use edge_sqlite::settings::SettingsBuilder;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let settings = SettingsBuilder::new().skip_env().build().unwrap();
//! let sink = Arc::new(MemorySink::new());
//! let controller = ReconfigurationController::from_settings(&settings, sink.clone());
//!
//! controller.start(Some(&json!({"SQLiteConfigs": {"db": {"DbPath": ":memory:",
//!     "t": {"TableName": "t", "v": {"ColumnName": "V", "Type": "TEXT"}}}}}))).unwrap();
//!
//! let message = BusMessage::command(&InboundCommand {
//!     request_id: 1,
//!     request_module: "caller".into(),
//!     db_name: ":memory:".into(),
//!     command: "INSERT INTO t VALUES ('x'); SELECT V FROM t".into(),
//! }).unwrap();
//! controller.dispatcher().handle(&message);
//!
//! assert_eq!(sink.len(), 1);
//! ```

pub mod config;
pub mod database;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod reconfigure;
pub mod settings;

// Re-export key types at crate root for convenience
pub use config::{ConfigParser, ConfigValidator, Configuration};
pub use database::{ActiveState, ConnectionManager, StoreConnection};
pub use dispatch::{BusMessage, Dispatcher, Disposition, MemorySink, MessageSink};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel};
pub use reconfigure::{Lifecycle, ReconfigurationController};
pub use settings::{Settings, SettingsBuilder};
