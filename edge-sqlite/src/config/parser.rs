//! Configuration payload parsing.
//!
//! A payload is a JSON object holding the store configuration under the
//! reserved [`CONFIG_ROOT_KEY`]. Anything else at the top level (for example
//! the `$version` of a pushed property set) is ignored.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::config::schema::Configuration;
use crate::error::{Error, Result};

/// Reserved top-level key under which the store configuration lives.
pub const CONFIG_ROOT_KEY: &str = "SQLiteConfigs";

#[derive(Deserialize)]
struct ConfigDocument {
    #[serde(rename = "SQLiteConfigs")]
    root: Configuration,
}

/// Parses configuration payloads into a [`Configuration`].
///
/// # Examples
///
/// ```
/// use edge_sqlite::config::ConfigParser;
///
/// let config = ConfigParser::parse_str(r#"{"SQLiteConfigs": {}}"#).unwrap();
/// assert!(config.databases.is_empty());
///
/// assert!(ConfigParser::parse_str(r#"{"Other": {}}"#).is_err());
/// ```
pub struct ConfigParser;

impl ConfigParser {
    /// Parse a payload from raw text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if the text is not well-formed JSON,
    /// the reserved root key is absent, or the tree has the wrong shape.
    pub fn parse_str(text: &str) -> Result<Configuration> {
        serde_json::from_str::<ConfigDocument>(text)
            .map(|doc| doc.root)
            .map_err(|e| Error::ConfigParse {
                message: e.to_string(),
            })
    }

    /// Parse a payload that has already been decoded, such as a pushed
    /// property set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if the reserved root key is absent or
    /// the tree has the wrong shape.
    pub fn parse_value(value: &Value) -> Result<Configuration> {
        ConfigDocument::deserialize(value)
            .map(|doc| doc.root)
            .map_err(|e| Error::ConfigParse {
                message: e.to_string(),
            })
    }

    /// Read and parse a payload file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the file cannot be read, otherwise
    /// the errors of [`ConfigParser::parse_str`].
    pub fn parse_file(path: &Path) -> Result<Configuration> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read configuration file: {e}"),
        })?;
        Self::parse_str(&contents)
    }

    /// Whether a decoded payload carries the reserved root key.
    #[must_use]
    pub fn has_root(value: &Value) -> bool {
        value.get(CONFIG_ROOT_KEY).is_some()
    }
}
