//! Layered settings construction.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::settings::environment::EnvironmentSettings;
use crate::settings::loader::SettingsLoader;
use crate::settings::merger::SettingsMerger;
use crate::settings::schema::Settings;
use crate::settings::validator::SettingsValidator;

/// Builds [`Settings`] from defaults, a file, the environment and
/// programmatic overrides, in that order of precedence.
///
/// # Examples
///
/// ```
/// use edge_sqlite::settings::{Settings, SettingsBuilder};
///
/// let settings = SettingsBuilder::new()
///     .skip_env()
///     .with_settings(Settings { output_name: Some("results".into()), ..Default::default() })
///     .build()
///     .unwrap();
///
/// assert_eq!(settings.output_name(), "results");
/// assert_eq!(settings.input_name(), "input1");
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    file: Option<PathBuf>,
    skip_env: bool,
    overrides: Option<Settings>,
}

impl SettingsBuilder {
    /// Creates a builder that reads only defaults and the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the settings file at `path`. The file must exist.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Ignores `EDGE_SQLITE_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies programmatic overrides on top of every other layer.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        match &mut self.overrides {
            Some(existing) => SettingsMerger::merge_into(existing, &settings),
            None => self.overrides = Some(settings),
        }
        self
    }

    /// Merge every layer and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be loaded, an
    /// environment variable is malformed, or the merged settings are
    /// invalid.
    pub fn build(self) -> Result<Settings> {
        let mut settings = Settings::with_defaults();

        if let Some(path) = &self.file {
            let file = SettingsLoader::load_file(path)?;
            log::debug!("Loaded settings from {}", path.display());
            SettingsMerger::merge_into(&mut settings, &file);
        }

        if !self.skip_env {
            EnvironmentSettings::apply_overrides(&mut settings)?;
        }

        if let Some(overrides) = &self.overrides {
            SettingsMerger::merge_into(&mut settings, overrides);
        }

        SettingsValidator::validate(&settings)?;
        Ok(settings)
    }
}
