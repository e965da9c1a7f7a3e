//! Common test utilities for CLI integration tests.
//!
//! This module provides an isolated environment with a temporary directory,
//! command builders that ignore the caller's `EDGE_SQLITE_*` variables, and
//! configuration fixtures.

use assert_cmd::Command;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ENV_VARS: [&str; 7] = [
    "EDGE_SQLITE_SETTINGS",
    "EDGE_SQLITE_LOG_MODE",
    "EDGE_SQLITE_FALLBACK_CONFIG",
    "EDGE_SQLITE_COMMAND_TIMEOUT_MS",
    "EDGE_SQLITE_BUSY_TIMEOUT_MS",
    "EDGE_SQLITE_INPUT",
    "EDGE_SQLITE_OUTPUT",
];

/// Test environment rooted in a temporary directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// A command for the binary, run inside the temporary directory with
    /// every `EDGE_SQLITE_*` variable cleared.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("edge-sqlite").expect("Failed to find edge-sqlite binary");
        cmd.current_dir(&self.temp_path).env_remove("RUST_LOG");
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Path of `name` inside the temporary directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_path.join(name)
    }

    /// Write `contents` to `name` and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Write a configuration declaring one store at `db_path` with a
    /// key/value table named `t`.
    pub fn write_config(&self, name: &str, db_path: &Path) -> PathBuf {
        self.write(name, &config_for(db_path).to_string())
    }
}

/// A configuration with one store at `db_path` and one table `t`.
#[allow(dead_code)]
pub fn config_for(db_path: &Path) -> Value {
    json!({"SQLiteConfigs": {
        "$version": 1,
        "db": {
            "DbPath": db_path.to_string_lossy(),
            "table": {
                "TableName": "t",
                "id": {"ColumnName": "Id", "Type": "INTEGER", "IsKey": true, "NotNull": true},
                "value": {"ColumnName": "Value", "Type": "TEXT"}
            }
        }
    }})
}
