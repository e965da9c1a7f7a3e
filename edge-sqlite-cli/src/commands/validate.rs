//! Command to validate a store configuration file.

use crate::error::CliError;
use crate::utils::{load_valid_configuration, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

/// Validate a store configuration file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl ValidateCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_valid_configuration(&self.config_path)?;
        println!(
            "Configuration is valid ({} database(s), {} table(s))",
            config.databases.len(),
            config.table_count()
        );
        Ok(())
    }
}
