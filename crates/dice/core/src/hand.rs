//! Poker-style classification of a full five-dice roll.

use std::collections::BTreeMap;

use crate::state::DICE_COUNT;

/// Ranked outcome of five decoded values.
///
/// The display text is what players see in the outcome notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandCategory {
    /// At least one die read as 0: the roll is unreadable.
    #[strum(to_string = "Void")]
    Void,
    #[strum(to_string = "Straight")]
    Straight,
    #[strum(to_string = "One pair")]
    OnePair,
    #[strum(to_string = "Two pair")]
    TwoPair,
    #[strum(to_string = "Three of a kind")]
    ThreeOfKind,
    #[strum(to_string = "Full house")]
    FullHouse,
    #[strum(to_string = "Four of a kind")]
    FourOfKind,
    #[strum(to_string = "Invalid hand")]
    Invalid,
}

impl HandCategory {
    /// Classifies five decoded values.
    ///
    /// Priority: a zero anywhere voids the hand, then straights, then the
    /// multiplicity patterns.
    pub fn classify(values: &[i64; DICE_COUNT]) -> Self {
        if values.contains(&0) {
            return HandCategory::Void;
        }

        let mut sorted = *values;
        sorted.sort_unstable();

        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for value in sorted {
            *counts.entry(value).or_default() += 1;
        }

        let all_distinct = counts.len() == DICE_COUNT;
        let low_straight = sorted == [1, 2, 3, 4, 5];
        if (all_distinct && sorted[DICE_COUNT - 1] - sorted[0] == 4) || low_straight {
            return HandCategory::Straight;
        }

        let has_count = |n: usize| counts.values().any(|&count| count == n);
        match counts.len() {
            4 => HandCategory::OnePair,
            3 if has_count(3) => HandCategory::ThreeOfKind,
            3 => HandCategory::TwoPair,
            2 if has_count(4) => HandCategory::FourOfKind,
            2 => HandCategory::FullHouse,
            _ => HandCategory::Invalid,
        }
    }

    /// Text shown to the roller, or `None` for a void hand.
    pub fn notice(self) -> Option<String> {
        match self {
            HandCategory::Void => None,
            category => Some(format!("{category}! (this message is only seen by you!)")),
        }
    }
}

/// Collects decoded values of a full roll by canonical index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HandTally {
    values: [Option<i64>; DICE_COUNT],
}

impl HandTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the value of the die at `index`.
    ///
    /// Returns the five values once every index is filled, resetting the
    /// tally for the next roll. A later report for the same index replaces
    /// the earlier one.
    pub fn record(&mut self, index: usize, value: i64) -> Option<[i64; DICE_COUNT]> {
        let slot = self.values.get_mut(index)?;
        *slot = Some(value);

        if self.values.iter().any(Option::is_none) {
            return None;
        }

        let mut complete = [0; DICE_COUNT];
        for (out, value) in complete.iter_mut().zip(self.values.iter().flatten()) {
            *out = *value;
        }
        self.reset();
        Some(complete)
    }

    pub fn reset(&mut self) {
        self.values = [None; DICE_COUNT];
    }

    /// Number of indices still waiting for a value.
    pub fn pending(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }
}
