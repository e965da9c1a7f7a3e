//! Routing of inbound commands to the active stores.
//!
//! The dispatcher holds the currently published [`ActiveState`] behind an
//! atomically swappable pointer. Each message borrows the snapshot that is
//! current when it arrives and keeps it alive until it is done, so a
//! reconfiguration never pulls a connection out from under a running
//! command. An empty binding means every message is discarded.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;

use super::message::{BusMessage, InboundCommand, OutboundResult};
use super::sink::MessageSink;
use crate::database::ActiveState;

/// Default bound on a single command's execution time.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Default output results are published on.
pub const DEFAULT_OUTPUT: &str = "sqliteOutput";

/// Why a message was dropped without a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// No configuration is active.
    NotServing,
    /// The message is not an SQLite command.
    UnrecognizedKind,
    /// The body is not a well-formed command.
    MalformedBody,
    /// No active store is registered under the command's `DbName`.
    UnknownDatabase,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotServing => "no active configuration",
            Self::UnrecognizedKind => "not an SQLite command",
            Self::MalformedBody => "malformed command body",
            Self::UnknownDatabase => "unknown database",
        };
        f.write_str(text)
    }
}

/// What became of one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Rows were produced and published.
    Published,
    /// The command succeeded without rows; nothing was published.
    Empty,
    /// The message was dropped before execution.
    Dropped(DropReason),
    /// Execution or publication failed; the error was logged.
    Failed(String),
}

/// Routes inbound commands to the active stores and publishes results.
///
/// # Examples
///
/// ```
/// use edge_sqlite::config::ConfigParser;
/// use edge_sqlite::database::ConnectionManager;
/// use edge_sqlite::dispatch::{BusMessage, Dispatcher, Disposition, InboundCommand, MemorySink};
/// use std::sync::Arc;
///
/// let config = ConfigParser::parse_str(
///     r#"{"SQLiteConfigs": {"db": {"DbPath": ":memory:"}}}"#,
/// ).unwrap();
/// let sink = Arc::new(MemorySink::new());
/// let dispatcher = Dispatcher::new(sink.clone());
/// dispatcher.install(ConnectionManager::default().activate(&config, 1));
///
/// let message = BusMessage::command(&InboundCommand {
///     request_id: 1,
///     request_module: "caller".into(),
///     db_name: ":memory:".into(),
///     command: "SELECT 'hello'".into(),
/// }).unwrap();
///
/// assert_eq!(dispatcher.handle(&message), Disposition::Published);
/// assert_eq!(sink.len(), 1);
/// ```
pub struct Dispatcher {
    active: ArcSwapOption<ActiveState>,
    received: AtomicU64,
    sink: Arc<dyn MessageSink>,
    output: String,
    command_timeout: Duration,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("active", &self.active.load().as_ref().map(|s| s.generation()))
            .field("received", &self.received.load(Ordering::Relaxed))
            .field("output", &self.output)
            .field("command_timeout", &self.command_timeout)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Creates a dispatcher that discards everything until a state is installed.
    #[must_use]
    pub fn new(sink: Arc<dyn MessageSink>) -> Self {
        Self {
            active: ArcSwapOption::empty(),
            received: AtomicU64::new(0),
            sink,
            output: DEFAULT_OUTPUT.to_string(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    /// Sets the output results are published on.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    /// Sets the bound on a single command's execution time.
    #[must_use]
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Publish `state`, returning the state it replaces.
    ///
    /// The replaced state retires once every in-flight command that
    /// borrowed it has finished.
    pub fn install(&self, state: ActiveState) -> Option<Arc<ActiveState>> {
        let state = Arc::new(state);
        log::info!(
            "Serving generation {} ({} store(s))",
            state.generation(),
            state.len()
        );
        self.active.swap(Some(state))
    }

    /// Unpublish the current state so every new message is discarded.
    pub fn discard_all(&self) -> Option<Arc<ActiveState>> {
        self.active.swap(None)
    }

    /// A borrow of the currently published state.
    #[must_use]
    pub fn current(&self) -> Option<Arc<ActiveState>> {
        self.active.load_full()
    }

    /// Whether a state is published.
    #[must_use]
    pub fn is_serving(&self) -> bool {
        self.active.load().is_some()
    }

    /// Number of messages handed to this dispatcher so far.
    #[must_use]
    pub fn messages_received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }

    /// The output results are published on.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Handle one inbound message against the current state.
    ///
    /// Never fails: every problem is logged and reported through the
    /// returned [`Disposition`].
    pub fn handle(&self, message: &BusMessage) -> Disposition {
        let snapshot = self.current();
        self.dispatch_on(snapshot.as_deref(), message)
    }

    /// Handle one inbound message against an explicitly borrowed state.
    ///
    /// `None` behaves like the discard binding.
    pub fn dispatch_on(&self, snapshot: Option<&ActiveState>, message: &BusMessage) -> Disposition {
        let count = self.received.fetch_add(1, Ordering::Relaxed) + 1;
        log::debug!("Received message #{count}");

        let Some(state) = snapshot else {
            return dropped(count, DropReason::NotServing);
        };

        if !message.is_command() {
            return dropped(count, DropReason::UnrecognizedKind);
        }

        let command: InboundCommand = match serde_json::from_str(&message.body) {
            Ok(command) => command,
            Err(err) => {
                log::debug!("Message #{count}: {err}");
                return dropped(count, DropReason::MalformedBody);
            }
        };

        let Some(store) = state.connection(&command.db_name) else {
            log::debug!("Message #{count}: no store at '{}'", command.db_name);
            return dropped(count, DropReason::UnknownDatabase);
        };

        let rows = match store.execute(&command.command, self.command_timeout) {
            Ok(rows) => rows,
            Err(err) => {
                log::error!(
                    "Request {} from '{}' failed on {}: {err}",
                    command.request_id,
                    command.request_module,
                    command.db_name
                );
                return Disposition::Failed(err.to_string());
            }
        };

        if rows.is_empty() {
            log::debug!("Request {} produced no rows", command.request_id);
            return Disposition::Empty;
        }

        let published = OutboundResult::for_command(&command, rows)
            .to_message()
            .and_then(|reply| self.sink.send(&self.output, reply));

        match published {
            Ok(()) => {
                log::debug!("Published result for request {}", command.request_id);
                Disposition::Published
            }
            Err(err) => {
                log::error!(
                    "Could not publish result for request {}: {err}",
                    command.request_id
                );
                Disposition::Failed(err.to_string())
            }
        }
    }
}

fn dropped(count: u64, reason: DropReason) -> Disposition {
    log::debug!("Dropping message #{count}: {reason}");
    Disposition::Dropped(reason)
}
