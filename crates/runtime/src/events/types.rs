//! Event types for different topics.

use std::fmt;

use dice_core::{CaptureError, DiceSet, Die, DieId, HandCategory, IgnoreReason, Layout, Position};
use serde::{Deserialize, Serialize};

use crate::api::PacketKind;
use crate::workers::DispatchReport;

/// User-visible message for the roller.
///
/// The display text is sent back to the client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    SetupEnabled,
    SetupComplete,
    UnknownLayout,
    /// Outcome of a full roll. Never carries [`HandCategory::Void`].
    Hand(HandCategory),
    /// Sum of a finished subset roll.
    SubsetSum(i64),
    PokerMessages { enabled: bool },
}

impl Notice {
    /// Notice for a hand, if the hand produces one.
    pub fn hand(category: HandCategory) -> Option<Self> {
        (category != HandCategory::Void).then_some(Notice::Hand(category))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::SetupEnabled => f.write_str("Setup mode enabled."),
            Notice::SetupComplete => f.write_str("Setup mode disabled. 5 dice IDs collected."),
            Notice::UnknownLayout => f.write_str("Unknown dice layout."),
            Notice::Hand(category) => f.write_str(&category.notice().unwrap_or_default()),
            Notice::SubsetSum(sum) => write!(f, "Sum of tri dice: {sum}"),
            Notice::PokerMessages { enabled: true } => f.write_str("Poker messages enabled."),
            Notice::PokerMessages { enabled: false } => f.write_str("Poker messages disabled."),
        }
    }
}

/// Capture lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SetupEvent {
    /// A capture started anchored at the observer position (if known)
    Started { observer: Option<Position> },

    /// A die was accepted into the running capture
    DieCaptured { die: Die, count: usize },

    /// An object report left the capture unchanged
    ReportIgnored { die: Die, reason: IgnoreReason },

    /// Five dice captured and committed in canonical order
    Finished { layout: Layout, dice: DiceSet },

    /// The capture could not be committed; the previous set stays in use
    Aborted { error: CaptureError },

    /// The capture was stopped before completion
    Stopped,
}

/// Outbound command events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RollEvent {
    /// One packet was handed to the sink
    PacketIssued { kind: PacketKind, die: DieId },

    /// All packets of a sequence signalled completion
    SequenceCompleted {
        kind: PacketKind,
        report: DispatchReport,
    },
}

/// Decoded roll results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ResultEvent {
    /// All five dice reported after a full roll
    HandEvaluated {
        category: HandCategory,
        values: [i64; 5],
    },

    /// Every die of the subset roll reported
    SubsetResolved { sum: i64 },
}
