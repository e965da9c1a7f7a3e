//! Module settings definitions.
//!
//! Settings tune the running module itself: where the fallback
//! configuration lives, how long commands may run, and which bus channels
//! are used. They are unrelated to the store configuration tree.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::database::DEFAULT_BUSY_TIMEOUT;
use crate::dispatch::{DEFAULT_COMMAND_TIMEOUT, DEFAULT_OUTPUT};
use crate::reconfigure::DEFAULT_FALLBACK_CONFIG;

/// Default input channel commands arrive on.
pub const DEFAULT_INPUT: &str = "input1";

/// Runtime settings of the module.
///
/// Every field is optional; unset fields fall back to built-in defaults
/// through the accessor methods.
///
/// # Examples
///
/// ```
/// use edge_sqlite::settings::Settings;
/// use std::time::Duration;
///
/// let settings: Settings = serde_yaml::from_str("command_timeout_ms: 2500\n").unwrap();
/// assert_eq!(settings.command_timeout(), Duration::from_millis(2500));
/// assert_eq!(settings.input_name(), "input1");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Local configuration file used when no pushed configuration exists.
    pub fallback_config: Option<PathBuf>,

    /// Bound on a single command's execution time (milliseconds).
    pub command_timeout_ms: Option<u64>,

    /// Time a store connection waits on a locked store (milliseconds).
    pub busy_timeout_ms: Option<u64>,

    /// Input channel carrying commands.
    pub input_name: Option<String>,

    /// Output channel results are published on.
    pub output_name: Option<String>,
}

impl Settings {
    /// Settings with every field set to its built-in default.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            fallback_config: Some(PathBuf::from(DEFAULT_FALLBACK_CONFIG)),
            command_timeout_ms: Some(millis(DEFAULT_COMMAND_TIMEOUT)),
            busy_timeout_ms: Some(millis(DEFAULT_BUSY_TIMEOUT)),
            input_name: Some(DEFAULT_INPUT.to_string()),
            output_name: Some(DEFAULT_OUTPUT.to_string()),
        }
    }

    /// Fallback configuration file.
    #[must_use]
    pub fn fallback_config(&self) -> &Path {
        self.fallback_config
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_FALLBACK_CONFIG))
    }

    /// Command execution bound.
    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        self.command_timeout_ms
            .map_or(DEFAULT_COMMAND_TIMEOUT, Duration::from_millis)
    }

    /// Store busy timeout.
    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        self.busy_timeout_ms
            .map_or(DEFAULT_BUSY_TIMEOUT, Duration::from_millis)
    }

    /// Input channel name.
    #[must_use]
    pub fn input_name(&self) -> &str {
        self.input_name.as_deref().unwrap_or(DEFAULT_INPUT)
    }

    /// Output channel name.
    #[must_use]
    pub fn output_name(&self) -> &str {
        self.output_name.as_deref().unwrap_or(DEFAULT_OUTPUT)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
