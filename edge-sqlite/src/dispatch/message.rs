//! Bus message envelope and the command/result bodies it carries.

use std::collections::BTreeMap;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::database::Rows;
use crate::error::Result;

/// Property naming the kind of an inbound message.
pub const COMMAND_TYPE_PROPERTY: &str = "command-type";

/// The only `command-type` this module acts on.
pub const SQLITE_COMMAND: &str = "SQLiteCmd";

/// Property naming the encoding of an outbound body.
pub const CONTENT_TYPE_PROPERTY: &str = "content-type";

/// Content type of published results.
pub const RESULT_CONTENT_TYPE: &str = "application/edge-sqlite-json";

/// Layout of [`OutboundResult::publish_timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A message as carried by the bus: string properties and a text body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusMessage {
    /// Application properties.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Message payload.
    #[serde(default)]
    pub body: String,
}

impl BusMessage {
    /// Creates a message without properties.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            properties: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Adds or replaces a property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Builds an inbound command message for `command`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be serialized.
    pub fn command(command: &InboundCommand) -> Result<Self> {
        Ok(Self::new(serde_json::to_string(command)?)
            .with_property(COMMAND_TYPE_PROPERTY, SQLITE_COMMAND))
    }

    /// The value of property `name`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Whether this message asks for a command to be executed.
    #[must_use]
    pub fn is_command(&self) -> bool {
        self.property(COMMAND_TYPE_PROPERTY) == Some(SQLITE_COMMAND)
    }
}

/// A command addressed to one store.
///
/// `db_name` is the store path, not the configuration alias.
///
/// # Examples
///
/// ```
/// use edge_sqlite::dispatch::InboundCommand;
///
/// let command: InboundCommand = serde_json::from_str(
///     r#"{"RequestId": 7, "RequestModule": "m", "DbName": "/data/a.db", "Command": "SELECT 1"}"#,
/// ).unwrap();
/// assert_eq!(command.request_id, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InboundCommand {
    /// Caller-chosen correlation id.
    pub request_id: i64,
    /// Name of the module that sent the command.
    pub request_module: String,
    /// Store path the command targets.
    pub db_name: String,
    /// SQL text, executed verbatim.
    pub command: String,
}

/// The rows produced by one command, addressed back to its sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutboundResult {
    /// Local time of publication, `YYYY-MM-DD HH:MM:SS`.
    pub publish_timestamp: String,
    /// Echo of [`InboundCommand::request_id`].
    pub request_id: i64,
    /// Echo of [`InboundCommand::request_module`].
    pub request_module: String,
    /// Result rows, every value rendered as text.
    pub rows: Rows,
}

impl OutboundResult {
    /// Builds a result for `command`, stamped with the current local time.
    #[must_use]
    pub fn for_command(command: &InboundCommand, rows: Rows) -> Self {
        Self {
            publish_timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            request_id: command.request_id,
            request_module: command.request_module.clone(),
            rows,
        }
    }

    /// Wraps the result in a bus message.
    ///
    /// # Errors
    ///
    /// Returns an error if the result cannot be serialized.
    pub fn to_message(&self) -> Result<BusMessage> {
        Ok(BusMessage::new(serde_json::to_string(self)?)
            .with_property(CONTENT_TYPE_PROPERTY, RESULT_CONTENT_TYPE))
    }
}
