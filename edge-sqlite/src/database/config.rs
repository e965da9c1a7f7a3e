//! Store connection parameters.
//!
//! This module provides the parameters used to open one store connection.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default time a connection waits on a locked store.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Path a store path resolves to when it names an in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// Configuration for one store connection.
///
/// # Examples
///
/// ```
/// use edge_sqlite::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/edge.db")
///     .with_busy_timeout(Duration::from_millis(10000));
/// assert_eq!(config.busy_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the store file.
    pub path: PathBuf,
    /// Busy timeout for store lock contention.
    pub busy_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates a configuration with default settings.
    ///
    /// The busy timeout defaults to 5000ms.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Sets the busy timeout duration.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Whether this configuration names a private in-memory store.
    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.path.as_os_str() == MEMORY_PATH
    }
}
