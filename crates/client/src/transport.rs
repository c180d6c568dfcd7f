//! Line-oriented stdio transport.
//!
//! Inbound, one report per line:
//!
//! ```text
//! self <x> <y>
//! object <id> <x> <y>
//! value <id> <raw>        (also: dice <id> <raw>)
//! chat <text...>
//! ```
//!
//! Outbound, one command per line: `THROW_DICE <id>`, `DICE_OFF <id>`,
//! `CHAT <notice>` and `FORWARD <text>` for chat that is not a command.

use std::sync::Arc;

use async_trait::async_trait;
use runtime::{Packet, PacketSink, SinkError};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("empty line")]
    Empty,

    #[error("unknown report kind `{kind}`")]
    UnknownKind { kind: String },

    #[error("`{kind}` report is missing its {field}")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("invalid coordinate `{token}`")]
    InvalidCoordinate { token: String },

    #[error("unexpected trailing input `{rest}`")]
    TrailingInput { rest: String },
}

/// One parsed inbound line.
///
/// Identifiers and raw values stay as text; the runtime validates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    ObserverMoved { x: i32, y: i32 },
    Object { id: String, x: i32, y: i32 },
    Value { id: String, raw: String },
    Chat(String),
}

impl Inbound {
    pub fn parse(line: &str) -> Result<Self, TransportError> {
        let line = line.trim();
        let (kind, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match kind {
            "" => Err(TransportError::Empty),
            "chat" => Ok(Inbound::Chat(rest.trim_start().to_owned())),
            "self" => {
                let mut fields = Fields::new("self", rest);
                let x = fields.coordinate("x")?;
                let y = fields.coordinate("y")?;
                fields.finish()?;
                Ok(Inbound::ObserverMoved { x, y })
            }
            "object" => {
                let mut fields = Fields::new("object", rest);
                let id = fields.token("id")?;
                let x = fields.coordinate("x")?;
                let y = fields.coordinate("y")?;
                fields.finish()?;
                Ok(Inbound::Object { id, x, y })
            }
            "value" | "dice" => {
                let mut fields = Fields::new("value", rest);
                let id = fields.token("id")?;
                let raw = fields.token("raw value")?;
                fields.finish()?;
                Ok(Inbound::Value { id, raw })
            }
            other => Err(TransportError::UnknownKind {
                kind: other.to_owned(),
            }),
        }
    }
}

struct Fields<'a> {
    kind: &'static str,
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn new(kind: &'static str, rest: &'a str) -> Self {
        Self {
            kind,
            tokens: rest.split_whitespace(),
        }
    }

    fn token(&mut self, field: &'static str) -> Result<String, TransportError> {
        self.tokens
            .next()
            .map(str::to_owned)
            .ok_or(TransportError::MissingField {
                kind: self.kind,
                field,
            })
    }

    fn coordinate(&mut self, field: &'static str) -> Result<i32, TransportError> {
        let token = self.token(field)?;
        token
            .parse()
            .map_err(|_| TransportError::InvalidCoordinate { token })
    }

    fn finish(mut self) -> Result<(), TransportError> {
        let rest: Vec<&str> = self.tokens.by_ref().collect();
        if rest.is_empty() {
            Ok(())
        } else {
            Err(TransportError::TrailingInput {
                rest: rest.join(" "),
            })
        }
    }
}

/// Serialized writer of outbound lines.
///
/// Packets are sent from concurrent tasks and notices from the event
/// consumer; the lock keeps every line whole.
pub struct LineWriter<W> {
    inner: Arc<Mutex<W>>,
}

impl<W> Clone for LineWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W> LineWriter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    pub async fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut writer = self.inner.lock().await;
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await
    }

    /// Shows `notice` to the roller.
    pub async fn chat(&self, notice: &str) -> std::io::Result<()> {
        self.write_line(&format!("CHAT {notice}")).await
    }

    /// Passes unrecognized chat through to the room.
    pub async fn forward(&self, text: &str) -> std::io::Result<()> {
        self.write_line(&format!("FORWARD {text}")).await
    }

    /// Consumes the writer and returns the inner value, if no clone is left.
    pub fn into_inner(self) -> Option<W> {
        Arc::into_inner(self.inner).map(Mutex::into_inner)
    }
}

/// [`PacketSink`] that writes each packet as one outbound line.
pub struct LineSink<W> {
    writer: LineWriter<W>,
}

impl<W> LineSink<W> {
    pub fn new(writer: LineWriter<W>) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl<W> PacketSink for LineSink<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    async fn send(&self, packet: Packet) -> Result<(), SinkError> {
        self.writer
            .write_line(&packet.to_string())
            .await
            .map_err(|err| SinkError::new(format!("failed to write {packet}: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use runtime::PacketKind;

    use super::*;

    #[test]
    fn parses_every_report_kind() {
        assert_eq!(
            Inbound::parse("self 4 -2"),
            Ok(Inbound::ObserverMoved { x: 4, y: -2 })
        );
        assert_eq!(
            Inbound::parse("object 120 3 5"),
            Ok(Inbound::Object {
                id: "120".into(),
                x: 3,
                y: 5
            })
        );
        assert_eq!(
            Inbound::parse("value 120 4563"),
            Ok(Inbound::Value {
                id: "120".into(),
                raw: "4563".into()
            })
        );
        assert_eq!(
            Inbound::parse("dice 120 4563"),
            Inbound::parse("value 120 4563")
        );
        assert_eq!(
            Inbound::parse("chat  hi :roll  now"),
            Ok(Inbound::Chat("hi :roll  now".into()))
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(Inbound::parse("   "), Err(TransportError::Empty));
        assert_eq!(
            Inbound::parse("jump 1 2"),
            Err(TransportError::UnknownKind {
                kind: "jump".into()
            })
        );
        assert_eq!(
            Inbound::parse("object 120 3"),
            Err(TransportError::MissingField {
                kind: "object",
                field: "y"
            })
        );
        assert_eq!(
            Inbound::parse("self a 2"),
            Err(TransportError::InvalidCoordinate { token: "a".into() })
        );
        assert_eq!(
            Inbound::parse("value 1 2 3"),
            Err(TransportError::TrailingInput { rest: "3".into() })
        );
    }

    #[tokio::test]
    async fn sink_writes_one_line_per_packet() {
        let writer = LineWriter::new(Vec::new());
        let sink = LineSink::new(writer.clone());

        sink.send(Packet::new(PacketKind::ThrowDice, "120".parse().unwrap()))
            .await
            .unwrap();
        sink.send(Packet::new(PacketKind::DiceOff, "121".parse().unwrap()))
            .await
            .unwrap();
        writer.chat("Setup mode enabled.").await.unwrap();
        drop(sink);

        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(
            output,
            "THROW_DICE 120\nDICE_OFF 121\nCHAT Setup mode enabled.\n"
        );
    }
}
