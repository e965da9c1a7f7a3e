//! Command to print the DDL a configuration produces.

use crate::error::CliError;
use crate::utils::{load_valid_configuration, GlobalOptions};
use clap::Args;
use edge_sqlite::database::create_table_sql;
use std::path::PathBuf;

/// Print the statements each configured table would be created with.
#[derive(Args)]
pub struct SchemaCommand {
    /// Configuration file to read
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl SchemaCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_valid_configuration(&self.config_path)?;

        for database in &config.databases {
            println!(
                "-- {} ({})",
                database.alias,
                database.path.as_deref().unwrap_or_default()
            );
            for table in &database.tables {
                println!("{};", create_table_sql(table)?);
            }
        }
        Ok(())
    }
}
