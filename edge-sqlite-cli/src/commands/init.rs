//! Command to create the stores and tables of a configuration.

use crate::error::CliError;
use crate::utils::{load_settings, load_valid_configuration, GlobalOptions};
use clap::Args;
use edge_sqlite::ConnectionManager;
use std::path::PathBuf;

/// Activate a configuration once: create every store and table, then exit.
#[derive(Args)]
pub struct InitCommand {
    /// Configuration file to activate
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl InitCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let settings = load_settings(global)?;
        let config = load_valid_configuration(&self.config_path)?;

        let state = ConnectionManager::new(settings.busy_timeout()).activate(&config, 1);

        for database in &config.databases {
            let Some(path) = database.path.as_deref() else {
                continue;
            };
            if state.connection(path).is_some() {
                println!("{}: {path} ({} table(s))", database.alias, database.tables.len());
            }
        }

        let failed = config.databases.len().saturating_sub(state.len());
        if failed > 0 {
            return Err(CliError::SemanticFailure(format!(
                "{failed} of {} database(s) could not be initialized",
                config.databases.len()
            )));
        }
        Ok(())
    }
}
