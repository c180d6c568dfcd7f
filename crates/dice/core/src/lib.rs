//! Deterministic dice logic shared by the runtime and its tests.
//!
//! `dice-core` knows how five dice sit around the observer, in which order
//! they are addressed, how reported values are decoded, and how a finished
//! roll is ranked. Everything here is synchronous and side-effect free; the
//! `runtime` crate adds channels, locks and timing on top.
pub mod capture;
pub mod decode;
pub mod hand;
pub mod layout;
pub mod state;
pub mod tri;

pub use capture::{CaptureError, CaptureSession, CaptureState, IgnoreReason, Ingest};
pub use decode::{DecodeError, VALUE_OFFSET, decode_for, decode_value, parse_raw};
pub use hand::{HandCategory, HandTally};
pub use layout::{Layout, LayoutError, arrange, detect_layout, sort_dice};
pub use state::{DICE_COUNT, DiceSet, Die, DieId, Position, TRIANGLE};
pub use tri::{PendingGroup, Resolution, SubsetRoll};
