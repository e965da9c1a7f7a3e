//! The published set of live store connections.

use std::collections::HashMap;

use super::connection::StoreConnection;

/// One activation's worth of open stores, keyed by store path.
///
/// An `ActiveState` is immutable once built. It is shared behind an `Arc`
/// and its connections close when the last reference drops, so a command
/// that borrowed the state keeps its connection open until it finishes.
#[derive(Debug, Default)]
pub struct ActiveState {
    generation: u64,
    connections: HashMap<String, StoreConnection>,
}

impl ActiveState {
    /// Builds a state from already opened connections.
    #[must_use]
    pub fn new(generation: u64, connections: HashMap<String, StoreConnection>) -> Self {
        Self {
            generation,
            connections,
        }
    }

    /// The activation number this state was built for.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The connection registered under `path`, if any.
    #[must_use]
    pub fn connection(&self, path: &str) -> Option<&StoreConnection> {
        self.connections.get(path)
    }

    /// Number of open stores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Whether no store is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Registered store paths, sorted.
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.connections.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

impl Drop for ActiveState {
    fn drop(&mut self) {
        if !self.connections.is_empty() {
            log::info!(
                "Retiring generation {} ({} store(s) closed)",
                self.generation,
                self.connections.len()
            );
        }
    }
}
