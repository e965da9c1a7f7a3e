//! Build script for edge-sqlite-cli.
//!
//! This script generates the man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("edge-sqlite")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Bridge bus commands to local SQLite stores")
        .long_about(
            "Edge module that executes SQL commands received over a message bus against \
             configured SQLite stores and republishes the result rows",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .help("Settings file (YAML)")
                .value_name("PATH")
                .global(true)
                .env("EDGE_SQLITE_SETTINGS"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the store busy timeout (in milliseconds)")
                .value_name("MS")
                .global(true),
        )
        .arg(
            Arg::new("command-timeout")
                .long("command-timeout")
                .help("Override the command execution timeout (in milliseconds)")
                .value_name("MS")
                .global(true),
        )
        .subcommands(vec![
            Command::new("run")
                .about("Serve commands from stdin until input closes")
                .long_about(
                    "Read bus messages and configuration pushes as JSON lines from stdin \
                     and write published results to stdout",
                ),
            Command::new("validate")
                .about("Validate a store configuration file")
                .long_about("Parse a configuration file and report every validation issue"),
            Command::new("schema")
                .about("Print the DDL a configuration produces")
                .long_about("Print the CREATE TABLE statement of every configured table"),
            Command::new("init")
                .about("Create the stores and tables of a configuration")
                .long_about("Activate a configuration once and report the stores it opened"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("edge-sqlite.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
