//! Main entry point for the edge-sqlite module.
//!
//! This binary hosts the command bridge. It provides:
//! - `run`: Serve commands from the line transport
//! - `validate`: Validate a store configuration file
//! - `schema`: Print the DDL a configuration produces
//! - `init`: Create the stores and tables of a configuration

mod cli;
mod commands;
mod error;
mod transport;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _level = edge_sqlite::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        settings: cli.settings,
        busy_timeout: cli.busy_timeout,
        command_timeout: cli.command_timeout,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Run(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Schema(cmd) => cmd.execute(&global),
        cli::Command::Init(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
