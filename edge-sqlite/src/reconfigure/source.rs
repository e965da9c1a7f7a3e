//! Where a configuration comes from.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::{ConfigParser, Configuration};
use crate::error::Result;

/// Default local fallback configuration file.
pub const DEFAULT_FALLBACK_CONFIG: &str = "iot-edge-sqlite.json";

/// A configuration payload ready to be parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// A remotely pushed property set carrying the reserved root key.
    Pushed(Value),
    /// The local fallback file.
    LocalFile(PathBuf),
}

impl ConfigSource {
    /// Pick the source for one reconfiguration attempt.
    ///
    /// A pushed payload wins when it carries the reserved root key;
    /// otherwise the fallback file is used when it exists. Returns `None`
    /// when neither is available.
    ///
    /// # Examples
    ///
    /// ```
    /// use edge_sqlite::reconfigure::ConfigSource;
    /// use serde_json::json;
    /// use std::path::Path;
    ///
    /// let pushed = json!({"SQLiteConfigs": {}});
    /// let source = ConfigSource::resolve(Some(&pushed), Path::new("missing.json"));
    /// assert!(matches!(source, Some(ConfigSource::Pushed(_))));
    ///
    /// let unrelated = json!({"$version": 2});
    /// assert_eq!(ConfigSource::resolve(Some(&unrelated), Path::new("missing.json")), None);
    /// ```
    #[must_use]
    pub fn resolve(desired: Option<&Value>, fallback: &Path) -> Option<Self> {
        if let Some(value) = desired.filter(|v| ConfigParser::has_root(v)) {
            return Some(Self::Pushed(value.clone()));
        }
        if fallback.is_file() {
            return Some(Self::LocalFile(fallback.to_path_buf()));
        }
        None
    }

    /// Parse the payload into a configuration tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`](crate::Error::ConfigParse) if the
    /// payload is malformed, or
    /// [`Error::InvalidPath`](crate::Error::InvalidPath) if the file
    /// cannot be read.
    pub fn load(&self) -> Result<Configuration> {
        match self {
            Self::Pushed(value) => ConfigParser::parse_value(value),
            Self::LocalFile(path) => ConfigParser::parse_file(path),
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pushed(_) => write!(f, "pushed properties"),
            Self::LocalFile(path) => write!(f, "local file {}", path.display()),
        }
    }
}
