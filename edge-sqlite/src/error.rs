//! Error types for the edge-sqlite library.
//!
//! This module provides the error hierarchy shared by configuration parsing,
//! store activation, command dispatch, and module settings, using `thiserror`
//! for ergonomic error handling.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::config::ValidationIssue;

/// Result type alias for operations that may fail with an edge-sqlite error.
///
/// # Examples
///
/// ```
/// use edge_sqlite::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the edge-sqlite library.
#[derive(Debug, Error)]
pub enum Error {
    /// A store (`SQLite`) error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A JSON payload could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A settings file could not be decoded.
    #[error("settings error: {0}")]
    Settings(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration payload is malformed or lacks the reserved root key.
    #[error("configuration parse error: {message}")]
    ConfigParse {
        /// A description of what could not be parsed.
        message: String,
    },

    /// The configuration parsed but failed structural validation.
    #[error("configuration rejected with {} issue(s): {}", issues.len(), join_issues(issues))]
    InvalidConfiguration {
        /// Every issue found during validation.
        issues: Vec<ValidationIssue>,
    },

    /// Neither a pushed payload nor a local fallback file was available.
    #[error("no configuration available (looked for pushed payload and {})", fallback.display())]
    NoConfiguration {
        /// The fallback file that was probed.
        fallback: PathBuf,
    },

    /// A store could not be opened or its schema could not be created.
    #[error("store {path} unavailable: {source}")]
    Connection {
        /// Store path of the failing database.
        path: String,
        /// The underlying store error.
        #[source]
        source: rusqlite::Error,
    },

    /// A command exceeded the configured execution deadline.
    #[error("command execution exceeded {}ms", timeout.as_millis())]
    ExecutionTimeout {
        /// The deadline that was exceeded.
        timeout: Duration,
    },

    /// A settings value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An outbound message could not be handed to the bus.
    #[error("failed to publish to '{output}': {message}")]
    Publish {
        /// The output channel name.
        output: String,
        /// A description of the transport failure.
        message: String,
    },
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Check if the error came from a configuration that could not be
    /// obtained, parsed, or validated.
    ///
    /// # Examples
    ///
    /// ```
    /// use edge_sqlite::Error;
    ///
    /// let err = Error::ConfigParse { message: "missing SQLiteConfigs".into() };
    /// assert!(err.is_configuration_error());
    /// ```
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigParse { .. } | Self::InvalidConfiguration { .. } | Self::NoConfiguration { .. }
        )
    }
}
