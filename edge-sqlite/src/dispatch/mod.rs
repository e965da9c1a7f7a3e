//! Message-driven command dispatch.
//!
//! Inbound messages carry a `command-type` property and a JSON body naming
//! a store path and the SQL to run there. The [`Dispatcher`] routes each
//! command to the matching store of the active state and publishes any
//! rows it produces through a [`MessageSink`].

mod dispatcher;
mod message;
mod sink;

pub use dispatcher::{
    Dispatcher, Disposition, DropReason, DEFAULT_COMMAND_TIMEOUT, DEFAULT_OUTPUT,
};
pub use message::{
    BusMessage, InboundCommand, OutboundResult, COMMAND_TYPE_PROPERTY, CONTENT_TYPE_PROPERTY,
    RESULT_CONTENT_TYPE, SQLITE_COMMAND, TIMESTAMP_FORMAT,
};
pub use sink::{MemorySink, MessageSink};
