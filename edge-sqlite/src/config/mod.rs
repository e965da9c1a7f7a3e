//! Store configuration: the databases → tables → columns tree.
//!
//! This module turns a configuration payload into a typed tree and decides
//! whether that tree may be activated:
//! - [`ConfigParser`] reads the payload (pushed property set or local file)
//! - [`ConfigValidator`] checks structural completeness, collecting every issue
//!
//! # Payload Shape
//!
//! ```json
//! { "SQLiteConfigs": {
//!     "$version": 3,
//!     "<dbAlias>": {
//!       "DbPath": "/data/store.db",
//!       "<tableAlias>": {
//!         "TableName": "readings",
//!         "<columnAlias>": { "ColumnName": "Id", "Type": "INTEGER", "IsKey": true, "NotNull": true }
//!       }
//!     }
//! } }
//! ```
//!
//! # Examples
//!
//! ```
//! use edge_sqlite::config::{ConfigParser, ConfigValidator};
//!
//! let config = ConfigParser::parse_str(r#"{ "SQLiteConfigs": {
//!     "main": { "DbPath": "/tmp/main.db", "t": { "TableName": "t",
//!         "id": { "ColumnName": "Id", "Type": "INTEGER", "IsKey": true } } }
//! } }"#).unwrap();
//!
//! assert!(ConfigValidator::validate(&config).is_valid());
//! ```

pub mod parser;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use parser::{ConfigParser, CONFIG_ROOT_KEY};
pub use schema::{Column, Configuration, Database, Table, VERSION_KEY};
pub use validator::{ConfigValidator, IssueKind, ValidationIssue, ValidationReport};
