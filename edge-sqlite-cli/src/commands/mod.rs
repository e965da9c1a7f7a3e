//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `run`: Serve commands from the line transport until input closes
//! - `validate`: Validate a store configuration file
//! - `schema`: Print the DDL a configuration produces
//! - `init`: Create the stores and tables of a configuration

pub mod init;
pub mod run;
pub mod schema;
pub mod validate;

pub use init::InitCommand;
pub use run::RunCommand;
pub use schema::SchemaCommand;
pub use validate::ValidateCommand;
