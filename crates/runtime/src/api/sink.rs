//! Asynchronous seam for outbound dice packets.
//!
//! The runtime never talks to the network. Embedders plug in a
//! [`PacketSink`] that forwards packets to the game connection, a test
//! recorder, or a scripted transport.
use std::fmt;

use async_trait::async_trait;
use dice_core::DieId;
use serde::{Deserialize, Serialize};

/// Kind of command issued to a die.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PacketKind {
    /// Activate the die.
    ThrowDice,
    /// Deactivate the die.
    DiceOff,
}

/// A single command addressed to one die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    pub kind: PacketKind,
    pub die: DieId,
}

impl Packet {
    pub fn new(kind: PacketKind, die: DieId) -> Self {
        Self { kind, die }
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.die)
    }
}

/// Error reported by a sink that could not hand a packet over.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct SinkError {
    pub message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Destination for outbound packets.
///
/// `send` resolving means the packet was issued locally; delivery to the room
/// is not part of the contract. Implementations must tolerate concurrent
/// calls, since every packet of a sequence is sent from its own task.
#[async_trait]
pub trait PacketSink: Send + Sync {
    async fn send(&self, packet: Packet) -> Result<(), SinkError>;
}

/// A sink that drops everything. Useful as a placeholder in tests.
pub struct NullSink;

#[async_trait]
impl PacketSink for NullSink {
    async fn send(&self, packet: Packet) -> Result<(), SinkError> {
        tracing::trace!("Dropping packet {}", packet);
        Ok(())
    }
}
