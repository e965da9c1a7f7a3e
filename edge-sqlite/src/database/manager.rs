//! Activation of a validated configuration against live stores.

use std::collections::HashMap;
use std::time::Duration;

use crate::config::{Configuration, Database};
use crate::error::{Error, Result};

use super::config::{DatabaseConfig, DEFAULT_BUSY_TIMEOUT};
use super::connection::StoreConnection;
use super::state::ActiveState;

/// Opens one store per configured database and creates its tables.
///
/// Activation is partial: a database whose store cannot be opened, or one
/// of whose tables cannot be created, is logged and left out while the
/// rest of the configuration still activates.
///
/// # Examples
///
/// ```
/// use edge_sqlite::config::ConfigParser;
/// use edge_sqlite::database::ConnectionManager;
///
/// let config = ConfigParser::parse_str(r#"{"SQLiteConfigs": {"db": {
///     "DbPath": ":memory:",
///     "t": {"TableName": "t", "id": {"ColumnName": "Id", "Type": "INTEGER", "IsKey": true}}
/// }}}"#).unwrap();
///
/// let state = ConnectionManager::default().activate(&config, 1);
/// assert!(state.connection(":memory:").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ConnectionManager {
    busy_timeout: Duration,
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new(DEFAULT_BUSY_TIMEOUT)
    }
}

impl ConnectionManager {
    /// Creates a manager whose stores wait `busy_timeout` on lock contention.
    #[must_use]
    pub const fn new(busy_timeout: Duration) -> Self {
        Self { busy_timeout }
    }

    /// Build a fresh [`ActiveState`] for `config`.
    ///
    /// The configuration is expected to have passed validation.
    #[must_use]
    pub fn activate(&self, config: &Configuration, generation: u64) -> ActiveState {
        let mut connections = HashMap::with_capacity(config.databases.len());

        for database in &config.databases {
            match self.open_database(database) {
                Ok(store) => {
                    log::info!(
                        "Database '{}' ready at {} ({} table(s))",
                        database.alias,
                        store.path(),
                        database.tables.len()
                    );
                    connections.insert(store.path().to_string(), store);
                }
                Err(err) => {
                    log::error!("Skipping database '{}': {err}", database.alias);
                }
            }
        }

        ActiveState::new(generation, connections)
    }

    fn open_database(&self, database: &Database) -> Result<StoreConnection> {
        let path = database.path.as_deref().ok_or_else(|| Error::Validation {
            field: database.alias.clone(),
            message: "missing DbPath".into(),
        })?;

        let store = StoreConnection::open(
            &DatabaseConfig::new(path).with_busy_timeout(self.busy_timeout),
        )?;

        for table in &database.tables {
            store.create_table(table).map_err(|err| match err {
                Error::Database(source) => Error::Connection {
                    path: path.to_string(),
                    source,
                },
                other => other,
            })?;
        }

        Ok(store)
    }
}
