//! Spatial classification of the five dice around the observer.
//!
//! The dice are expected to fill the 3×2 (or 2×3) block next to the observer,
//! with the observer standing on the sixth tile of that block. Which side the
//! block extends to decides the [`Layout`], and the layout decides how the
//! dice are sequenced (see [`sequence`]).
//!
//! Only this clustered geometry is recognized. Anything else is
//! [`Layout::Unknown`], which callers treat as a terminal classification.

pub mod sequence;

use std::collections::BTreeSet;

use crate::state::{DICE_COUNT, DiceSet, Die, Position};

pub use sequence::{bearing, sort_dice};

/// Orientation of the dice block relative to the observer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Layout {
    /// Block occupies the observer's column and the one at `x + 1`.
    Bottom,
    /// Block occupies the observer's column and the one at `x - 1`.
    Top,
    /// Block occupies the observer's row and the one at `y + 1`.
    Left,
    /// Block occupies the observer's row and the one at `y - 1`.
    Right,
    Unknown,
}

impl Layout {
    pub fn is_known(self) -> bool {
        self != Layout::Unknown
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutError {
    #[error("expected 5 dice on distinct tiles, found {found}")]
    DieCount { found: usize },

    #[error("dice arrangement does not match any known layout")]
    Unknown,
}

/// Classifies the arrangement of `positions` around `observer`.
///
/// Works on the sets of distinct X and Y coordinates: one axis must hold two
/// values (the observer's own plus one neighbor), the other must hold exactly
/// the three values straddling the observer.
pub fn detect_layout(observer: Position, positions: &[Position]) -> Layout {
    let xs: BTreeSet<i32> = positions.iter().map(|p| p.x).collect();
    let ys: BTreeSet<i32> = positions.iter().map(|p| p.y).collect();

    let straddles = |set: &BTreeSet<i32>, center: i32| {
        set.len() == 3 && (center - 1..=center + 1).all(|v| set.contains(&v))
    };
    let pairs_with = |set: &BTreeSet<i32>, center: i32, offset: i32| {
        set.len() == 2 && set.contains(&center) && set.contains(&(center + offset))
    };

    if straddles(&ys, observer.y) {
        if pairs_with(&xs, observer.x, 1) {
            return Layout::Bottom;
        }
        if pairs_with(&xs, observer.x, -1) {
            return Layout::Top;
        }
    }

    if straddles(&xs, observer.x) {
        if pairs_with(&ys, observer.y, 1) {
            return Layout::Left;
        }
        if pairs_with(&ys, observer.y, -1) {
            return Layout::Right;
        }
    }

    Layout::Unknown
}

/// Classifies `dice` and puts them in canonical order.
///
/// Fails unless there are exactly five dice on five distinct tiles forming a
/// known layout. Returns the detected layout alongside the ordered set.
pub fn arrange(observer: Position, mut dice: Vec<Die>) -> Result<(Layout, DiceSet), LayoutError> {
    let positions: Vec<Position> = dice.iter().map(|die| die.position).collect();
    let distinct = positions.iter().collect::<BTreeSet<_>>().len();
    if dice.len() != DICE_COUNT || distinct != DICE_COUNT {
        return Err(LayoutError::DieCount {
            found: distinct.min(dice.len()),
        });
    }

    let layout = detect_layout(observer, &positions);
    if !layout.is_known() {
        return Err(LayoutError::Unknown);
    }

    sort_dice(layout, observer, &mut dice);

    let found = dice.len();
    let ordered: [Die; DICE_COUNT] = dice
        .try_into()
        .map_err(|_| LayoutError::DieCount { found })?;

    Ok((layout, DiceSet::from_ordered(ordered)))
}
