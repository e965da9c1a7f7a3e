//! The validate/activate/degrade lifecycle.
//!
//! Every configuration change runs the same attempt: unpublish the active
//! state, resolve a source, parse, validate, open the stores, publish. Any
//! failure leaves the module inert with the discard binding installed
//! until the next change succeeds. The process never exits on a bad
//! configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use super::source::{ConfigSource, DEFAULT_FALLBACK_CONFIG};
use crate::config::ConfigValidator;
use crate::database::{ActiveState, ConnectionManager};
use crate::dispatch::{Dispatcher, MessageSink};
use crate::error::{Error, Result};
use crate::settings::Settings;

/// Where the module stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Not started yet.
    Uninitialized,
    /// A reconfiguration attempt is running; messages are discarded.
    Reconfiguring,
    /// A configuration is active and commands are served.
    Active,
    /// The last attempt failed; messages are discarded.
    Inert,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Reconfiguring => "reconfiguring",
            Self::Active => "active",
            Self::Inert => "inert",
        };
        f.write_str(name)
    }
}

/// Drives (re)activation of the dispatcher's state.
///
/// Attempts are serialized; commands keep flowing while one runs and are
/// discarded until it finishes.
///
/// # Examples
///
/// ```
/// use edge_sqlite::dispatch::{Dispatcher, MemorySink};
/// use edge_sqlite::reconfigure::{Lifecycle, ReconfigurationController};
/// use edge_sqlite::database::ConnectionManager;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let dispatcher = Arc::new(Dispatcher::new(Arc::new(MemorySink::new())));
/// let controller = ReconfigurationController::new(
///     dispatcher.clone(),
///     ConnectionManager::default(),
///     "missing-fallback.json",
/// );
///
/// let pushed = json!({"SQLiteConfigs": {"db": {"DbPath": ":memory:"}}});
/// controller.start(Some(&pushed)).unwrap();
/// assert_eq!(controller.lifecycle(), Lifecycle::Active);
/// assert!(dispatcher.is_serving());
/// ```
#[derive(Debug)]
pub struct ReconfigurationController {
    dispatcher: Arc<Dispatcher>,
    manager: ConnectionManager,
    fallback_config: PathBuf,
    lifecycle: Mutex<Lifecycle>,
    generation: AtomicU64,
    reconfigure_lock: Mutex<()>,
}

impl ReconfigurationController {
    /// Creates a controller for `dispatcher`.
    #[must_use]
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        manager: ConnectionManager,
        fallback_config: impl AsRef<Path>,
    ) -> Self {
        Self {
            dispatcher,
            manager,
            fallback_config: fallback_config.as_ref().to_path_buf(),
            lifecycle: Mutex::new(Lifecycle::Uninitialized),
            generation: AtomicU64::new(0),
            reconfigure_lock: Mutex::new(()),
        }
    }

    /// Builds a dispatcher publishing to `sink` and a controller for it,
    /// both configured from `settings`.
    #[must_use]
    pub fn from_settings(settings: &Settings, sink: Arc<dyn MessageSink>) -> Self {
        let dispatcher = Dispatcher::new(sink)
            .with_output(settings.output_name())
            .with_command_timeout(settings.command_timeout());
        Self::new(
            Arc::new(dispatcher),
            ConnectionManager::new(settings.busy_timeout()),
            settings.fallback_config(),
        )
    }

    /// The dispatcher this controller publishes to.
    #[must_use]
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// The local fallback file.
    #[must_use]
    pub fn fallback_config(&self) -> &Path {
        &self.fallback_config
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        *self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of the most recently activated generation, 0 before the first.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Run the first activation.
    ///
    /// `desired` is the pushed property set available at startup, if any.
    ///
    /// # Errors
    ///
    /// Returns the reason the module went inert. The controller has
    /// already logged it and stays usable.
    pub fn start(&self, desired: Option<&Value>) -> Result<u64> {
        if self.lifecycle() != Lifecycle::Uninitialized {
            log::warn!("Start requested while {}; reconfiguring", self.lifecycle());
        }
        self.reconfigure(desired)
    }

    /// React to a pushed configuration change.
    ///
    /// # Errors
    ///
    /// Returns the reason the module went inert. The controller has
    /// already logged it and stays usable.
    pub fn on_configuration_change(&self, desired: &Value) -> Result<u64> {
        self.reconfigure(Some(desired))
    }

    fn reconfigure(&self, desired: Option<&Value>) -> Result<u64> {
        let _attempt = self
            .reconfigure_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        self.set_lifecycle(Lifecycle::Reconfiguring);
        // The unpublished state retires once in-flight commands release it
        drop(self.dispatcher.discard_all());

        match self.build_state(desired) {
            Ok(state) => {
                let generation = state.generation();
                self.dispatcher.install(state);
                self.set_lifecycle(Lifecycle::Active);
                Ok(generation)
            }
            Err(err) => {
                log::error!("Reconfiguration failed, discarding all messages: {err}");
                self.set_lifecycle(Lifecycle::Inert);
                Err(err)
            }
        }
    }

    fn build_state(&self, desired: Option<&Value>) -> Result<ActiveState> {
        let source = ConfigSource::resolve(desired, &self.fallback_config).ok_or_else(|| {
            Error::NoConfiguration {
                fallback: self.fallback_config.clone(),
            }
        })?;
        log::info!("Loading configuration from {source}");

        let config = source.load()?;
        ConfigValidator::check(&config)?;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(self.manager.activate(&config, generation))
    }

    fn set_lifecycle(&self, next: Lifecycle) {
        let mut current = self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner);
        if *current != next {
            log::info!("Lifecycle {} -> {next}", *current);
        }
        *current = next;
    }
}

impl Default for ReconfigurationController {
    fn default() -> Self {
        Self::new(
            Arc::new(Dispatcher::new(Arc::new(crate::dispatch::MemorySink::new()))),
            ConnectionManager::default(),
            DEFAULT_FALLBACK_CONFIG,
        )
    }
}
