//! Settings validation.

use crate::error::{Error, Result};
use crate::settings::schema::Settings;

/// Validates settings after all layers are merged.
///
/// # Examples
///
/// ```
/// use edge_sqlite::settings::{Settings, SettingsValidator};
///
/// SettingsValidator::validate(&Settings::with_defaults()).unwrap();
///
/// let zero = Settings { command_timeout_ms: Some(0), ..Default::default() };
/// assert!(SettingsValidator::validate(&zero).is_err());
/// ```
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate merged settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(settings: &Settings) -> Result<()> {
        if let Some(path) = &settings.fallback_config {
            if path.as_os_str().is_empty() {
                return Err(Error::Validation {
                    field: "fallback_config".into(),
                    message: "must not be empty".into(),
                });
            }
        }

        Self::validate_timeout("command_timeout_ms", settings.command_timeout_ms)?;
        Self::validate_timeout("busy_timeout_ms", settings.busy_timeout_ms)?;
        Self::validate_channel("input_name", settings.input_name.as_deref())?;
        Self::validate_channel("output_name", settings.output_name.as_deref())?;

        Ok(())
    }

    fn validate_timeout(field: &str, value: Option<u64>) -> Result<()> {
        if value == Some(0) {
            return Err(Error::Validation {
                field: field.into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    fn validate_channel(field: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(name) if name.trim().is_empty() => Err(Error::Validation {
                field: field.into(),
                message: "must not be empty".into(),
            }),
            Some(name) if name.chars().any(char::is_whitespace) => Err(Error::Validation {
                field: field.into(),
                message: format!("must not contain whitespace, got '{name}'"),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn field_of(result: Result<()>) -> String {
        match result {
            Err(Error::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        SettingsValidator::validate(&Settings::default()).unwrap();
        SettingsValidator::validate(&Settings::with_defaults()).unwrap();
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        let command = Settings {
            command_timeout_ms: Some(0),
            ..Default::default()
        };
        assert_eq!(field_of(SettingsValidator::validate(&command)), "command_timeout_ms");

        let busy = Settings {
            busy_timeout_ms: Some(0),
            ..Default::default()
        };
        assert_eq!(field_of(SettingsValidator::validate(&busy)), "busy_timeout_ms");
    }

    #[test]
    fn test_channel_names() {
        let blank = Settings {
            output_name: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(field_of(SettingsValidator::validate(&blank)), "output_name");

        let spaced = Settings {
            input_name: Some("input 1".into()),
            ..Default::default()
        };
        assert_eq!(field_of(SettingsValidator::validate(&spaced)), "input_name");
    }

    #[test]
    fn test_empty_fallback_rejected() {
        let settings = Settings {
            fallback_config: Some(PathBuf::new()),
            ..Default::default()
        };
        assert_eq!(field_of(SettingsValidator::validate(&settings)), "fallback_config");
    }
}
