//! Settings merging and precedence handling.

use crate::settings::schema::Settings;

/// Merges settings layers according to precedence rules.
///
/// # Examples
///
/// ```
/// use edge_sqlite::settings::{Settings, SettingsMerger};
///
/// let low = Settings { output_name: Some("low".to_string()), ..Default::default() };
/// let high = Settings { output_name: Some("high".to_string()), ..Default::default() };
///
/// let mut result = low;
/// SettingsMerger::merge_into(&mut result, &high);
/// assert_eq!(result.output_name, Some("high".to_string()));
/// ```
pub struct SettingsMerger;

impl SettingsMerger {
    /// Merge layers given from lowest to highest precedence.
    #[must_use]
    pub fn merge(layers: &[Settings]) -> Settings {
        let mut result = Settings::default();
        for layer in layers {
            Self::merge_into(&mut result, layer);
        }
        result
    }

    /// Merge `source` into `target`; every field set in `source` wins.
    pub fn merge_into(target: &mut Settings, source: &Settings) {
        if source.fallback_config.is_some() {
            target.fallback_config.clone_from(&source.fallback_config);
        }

        if source.command_timeout_ms.is_some() {
            target.command_timeout_ms = source.command_timeout_ms;
        }

        if source.busy_timeout_ms.is_some() {
            target.busy_timeout_ms = source.busy_timeout_ms;
        }

        if source.input_name.is_some() {
            target.input_name.clone_from(&source.input_name);
        }

        if source.output_name.is_some() {
            target.output_name.clone_from(&source.output_name);
        }
    }
}
