//! Runtime settings of the module.
//!
//! Settings are layered with the following precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via [`SettingsBuilder::with_settings`])
//! 2. Environment variables (`EDGE_SQLITE_*`)
//! 3. A YAML settings file (via [`SettingsBuilder::with_file`])
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use edge_sqlite::settings::SettingsBuilder;
//!
//! let settings = SettingsBuilder::new()
//!     .with_file("/etc/edge-sqlite/settings.yaml")
//!     .build()
//!     .unwrap();
//!
//! println!("Fallback configuration: {}", settings.fallback_config().display());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::SettingsBuilder;
pub use environment::{
    EnvironmentSettings, ENV_BUSY_TIMEOUT_MS, ENV_COMMAND_TIMEOUT_MS, ENV_FALLBACK_CONFIG,
    ENV_INPUT, ENV_OUTPUT,
};
pub use loader::SettingsLoader;
pub use merger::SettingsMerger;
pub use schema::{Settings, DEFAULT_INPUT};
pub use validator::SettingsValidator;
