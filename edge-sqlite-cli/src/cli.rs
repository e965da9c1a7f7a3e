//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{InitCommand, RunCommand, SchemaCommand, ValidateCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Edge module bridging bus messages to local SQLite stores.
#[derive(Parser)]
#[command(name = "edge-sqlite")]
#[command(version, about = "Bridge bus commands to local SQLite stores", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Settings file (YAML)
    #[arg(long, value_name = "PATH", global = true, env = "EDGE_SQLITE_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Override the store busy timeout (in milliseconds)
    #[arg(long, value_name = "MS", global = true)]
    pub busy_timeout: Option<u64>,

    /// Override the command execution timeout (in milliseconds)
    #[arg(long, value_name = "MS", global = true)]
    pub command_timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Serve commands from stdin until input closes
    Run(RunCommand),

    /// Validate a store configuration file
    Validate(ValidateCommand),

    /// Print the DDL a configuration produces
    Schema(SchemaCommand),

    /// Create the stores and tables of a configuration
    Init(InitCommand),
}
