//! Environment variable handling for settings overrides.
//!
//! This module provides support for `EDGE_SQLITE_*` environment variables
//! that override settings file values.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::settings::schema::Settings;

/// Overrides the fallback configuration file.
pub const ENV_FALLBACK_CONFIG: &str = "EDGE_SQLITE_FALLBACK_CONFIG";
/// Overrides the command timeout (milliseconds).
pub const ENV_COMMAND_TIMEOUT_MS: &str = "EDGE_SQLITE_COMMAND_TIMEOUT_MS";
/// Overrides the busy timeout (milliseconds).
pub const ENV_BUSY_TIMEOUT_MS: &str = "EDGE_SQLITE_BUSY_TIMEOUT_MS";
/// Overrides the input channel name.
pub const ENV_INPUT: &str = "EDGE_SQLITE_INPUT";
/// Overrides the output channel name.
pub const ENV_OUTPUT: &str = "EDGE_SQLITE_OUTPUT";

/// Handles environment variable overrides for settings.
///
/// # Examples
///
/// ```no_run
/// use edge_sqlite::settings::{EnvironmentSettings, Settings};
///
/// let mut settings = Settings::default();
/// EnvironmentSettings::apply_overrides(&mut settings).unwrap();
/// ```
pub struct EnvironmentSettings;

impl EnvironmentSettings {
    /// Apply environment variable overrides to `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout variable is not a whole number of
    /// milliseconds.
    pub fn apply_overrides(settings: &mut Settings) -> Result<()> {
        if let Ok(path) = env::var(ENV_FALLBACK_CONFIG) {
            settings.fallback_config = Some(PathBuf::from(path));
        }

        if let Ok(value) = env::var(ENV_COMMAND_TIMEOUT_MS) {
            settings.command_timeout_ms = Some(Self::parse_millis(ENV_COMMAND_TIMEOUT_MS, &value)?);
        }

        if let Ok(value) = env::var(ENV_BUSY_TIMEOUT_MS) {
            settings.busy_timeout_ms = Some(Self::parse_millis(ENV_BUSY_TIMEOUT_MS, &value)?);
        }

        if let Ok(name) = env::var(ENV_INPUT) {
            settings.input_name = Some(name);
        }

        if let Ok(name) = env::var(ENV_OUTPUT) {
            settings.output_name = Some(name);
        }

        Ok(())
    }

    /// Parse a millisecond count.
    pub(crate) fn parse_millis(field: &str, value: &str) -> Result<u64> {
        value.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Must be a whole number of milliseconds, got '{value}'"),
        })
    }
}
