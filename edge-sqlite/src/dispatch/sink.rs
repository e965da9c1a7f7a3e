//! Outbound side of the message bus.

use std::sync::Mutex;

use super::message::BusMessage;
use crate::error::Result;

/// Somewhere published messages go.
///
/// The bus transport itself lives outside this crate; implementors adapt
/// it to this trait.
#[cfg_attr(test, mockall::automock)]
pub trait MessageSink: Send + Sync {
    /// Publish `message` on the output named `output`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Publish`](crate::Error::Publish) if the transport
    /// rejects the message.
    fn send(&self, output: &str, message: BusMessage) -> Result<()>;
}

/// A sink that keeps every message in memory.
///
/// # Examples
///
/// ```
/// use edge_sqlite::dispatch::{BusMessage, MemorySink, MessageSink};
///
/// let sink = MemorySink::new();
/// sink.send("out", BusMessage::new("hello")).unwrap();
/// assert_eq!(sink.take(), vec![("out".to_string(), BusMessage::new("hello"))]);
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    sent: Mutex<Vec<(String, BusMessage)>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, with their output names.
    #[must_use]
    pub fn sent(&self) -> Vec<(String, BusMessage)> {
        self.lock().clone()
    }

    /// Removes and returns the messages sent so far.
    #[must_use]
    pub fn take(&self) -> Vec<(String, BusMessage)> {
        std::mem::take(&mut *self.lock())
    }

    /// Number of messages sent so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(String, BusMessage)>> {
        self.sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl MessageSink for MemorySink {
    fn send(&self, output: &str, message: BusMessage) -> Result<()> {
        self.lock().push((output.to_string(), message));
        Ok(())
    }
}
