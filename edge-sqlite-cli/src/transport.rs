//! Line-oriented stand-in for the message bus.
//!
//! Each stdin line is one JSON envelope: either a bus message arriving on
//! a named input or a pushed configuration. Published messages are written
//! to stdout, one JSON object per line.

use edge_sqlite::dispatch::{BusMessage, MessageSink};
use edge_sqlite::Error as LibError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// One inbound line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    /// A configuration push (the desired property set).
    Desired {
        /// The pushed properties.
        desired: Value,
    },
    /// A message arriving on a bus input.
    Message {
        /// Input the message arrived on.
        input: String,
        /// Application properties.
        #[serde(default)]
        properties: BTreeMap<String, String>,
        /// Message payload.
        #[serde(default)]
        body: String,
    },
}

impl Envelope {
    /// Parse one line.
    pub fn parse(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }
}

/// One outbound line.
#[derive(Debug, Serialize)]
struct Outbound<'a> {
    output: &'a str,
    properties: &'a BTreeMap<String, String>,
    body: &'a str,
}

/// Writes published messages as JSON lines.
pub struct LineSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> LineSink<W> {
    /// Creates a sink writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl<W: Write + Send> MessageSink for LineSink<W> {
    fn send(&self, output: &str, message: BusMessage) -> edge_sqlite::Result<()> {
        let line = serde_json::to_string(&Outbound {
            output,
            properties: &message.properties,
            body: &message.body,
        })?;

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{line}")
            .and_then(|()| writer.flush())
            .map_err(|e| LibError::Publish {
                output: output.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_envelope() {
        let envelope = Envelope::parse(
            r#"{"input": "input1", "properties": {"command-type": "SQLiteCmd"}, "body": "{}"}"#,
        )
        .unwrap();
        match envelope {
            Envelope::Message {
                input, properties, ..
            } => {
                assert_eq!(input, "input1");
                assert_eq!(properties["command-type"], "SQLiteCmd");
            }
            other => panic!("unexpected envelope: {other:?}"),
        }
    }

    #[test]
    fn test_parse_desired_envelope() {
        let envelope = Envelope::parse(r#"{"desired": {"SQLiteConfigs": {}}}"#).unwrap();
        assert!(matches!(envelope, Envelope::Desired { .. }));
    }

    #[test]
    fn test_parse_rejects_unknown_shape() {
        assert!(Envelope::parse(r#"{"body": "no input"}"#).is_err());
        assert!(Envelope::parse("not json").is_err());
    }

    #[test]
    fn test_line_sink_writes_one_line_per_message() {
        let mut buffer = Vec::new();
        {
            let sink = LineSink::new(&mut buffer);
            sink.send("out", BusMessage::new("a").with_property("k", "v"))
                .unwrap();
            sink.send("out", BusMessage::new("b")).unwrap();
        }

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["output"], "out");
        assert_eq!(lines[0]["properties"]["k"], "v");
        assert_eq!(lines[1]["body"], "b");
    }
}
