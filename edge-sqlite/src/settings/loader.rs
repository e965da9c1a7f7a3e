//! Settings file loading.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::settings::schema::Settings;

/// Loads settings files.
///
/// # Examples
///
/// ```no_run
/// use edge_sqlite::settings::SettingsLoader;
/// use std::path::Path;
///
/// let settings = SettingsLoader::load_file(Path::new("/etc/edge-sqlite.yaml")).unwrap();
/// println!("Publishing on {}", settings.output_name());
/// ```
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load and parse a YAML settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Settings> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read settings file: {e}"),
        })?;

        Self::load_str(&contents).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Invalid YAML: {e}"),
        })
    }

    /// Parse settings from YAML text.
    ///
    /// An empty document yields empty settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Settings`] if the YAML is invalid or names an
    /// unknown field.
    pub fn load_str(contents: &str) -> Result<Settings> {
        if contents.trim().is_empty() {
            return Ok(Settings::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }
}
