//! Utility functions for CLI operations.
//!
//! This module provides common helpers used across CLI commands:
//! settings loading and configuration file handling.

use crate::error::CliError;
use edge_sqlite::config::{ConfigParser, ConfigValidator, Configuration};
use edge_sqlite::settings::{Settings, SettingsBuilder};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // verbose/quiet are consumed by logger setup in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Settings file to load.
    pub settings: Option<PathBuf>,

    /// Override the store busy timeout (in milliseconds).
    pub busy_timeout: Option<u64>,

    /// Override the command execution timeout (in milliseconds).
    pub command_timeout: Option<u64>,
}

/// Load layered module settings.
///
/// Settings are merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Settings file
/// 4. Built-in defaults (lowest priority)
pub fn load_settings(global: &GlobalOptions) -> Result<Settings, CliError> {
    let mut builder = SettingsBuilder::new();

    if let Some(path) = &global.settings {
        builder = builder.with_file(path);
    }

    builder
        .with_settings(Settings {
            busy_timeout_ms: global.busy_timeout,
            command_timeout_ms: global.command_timeout,
            ..Default::default()
        })
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Ensure a file named on the command line exists.
pub fn require_file(path: &Path) -> Result<(), CliError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::InvalidArguments(format!(
            "File not found: {}",
            path.display()
        )))
    }
}

/// Read a JSON document from a file.
pub fn read_json(path: &Path) -> Result<Value, CliError> {
    require_file(path)?;
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        CliError::InvalidArguments(format!("{} is not valid JSON: {e}", path.display()))
    })
}

/// Parse a store configuration file and reject it unless it validates.
///
/// Every validation issue is printed to stderr.
pub fn load_valid_configuration(path: &Path) -> Result<Configuration, CliError> {
    require_file(path)?;

    let config = match ConfigParser::parse_file(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Parse error: {e}");
            return Err(CliError::SemanticFailure(
                "Configuration file is invalid".to_string(),
            ));
        }
    };

    let report = ConfigValidator::validate(&config);
    if !report.is_valid() {
        for issue in report.issues() {
            eprintln!("Validation error: {issue}");
        }
        return Err(CliError::SemanticFailure(format!(
            "Configuration validation failed with {} issue(s)",
            report.issues().len()
        )));
    }

    Ok(config)
}
