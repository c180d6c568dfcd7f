//! Value types describing dice and where they stand.

mod common;
mod dice;

pub use common::{DieId, Position};
pub use dice::{DICE_COUNT, DiceSet, Die, TRIANGLE};
