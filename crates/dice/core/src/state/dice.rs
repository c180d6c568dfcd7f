use super::common::{DieId, Position};

/// Number of dice in a committed set.
pub const DICE_COUNT: usize = 5;

/// Canonical indices of the triangle subset (1st, 3rd and 5th die).
pub const TRIANGLE: [usize; 3] = [0, 2, 4];

/// A die observed in the room: its identifier and the tile it stands on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Die {
    pub id: DieId,
    pub position: Position,
}

impl Die {
    pub fn new(id: DieId, position: Position) -> Self {
        Self { id, position }
    }
}

/// Exactly five dice in canonical order.
///
/// Only produced by [`crate::layout::arrange`], so the order always follows
/// the sequencing rule of the detected layout. "No dice yet" is expressed as
/// `Option<DiceSet>` by the owners.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceSet {
    dice: [Die; DICE_COUNT],
}

impl DiceSet {
    pub(crate) fn from_ordered(dice: [Die; DICE_COUNT]) -> Self {
        Self { dice }
    }

    pub fn dice(&self) -> &[Die; DICE_COUNT] {
        &self.dice
    }

    pub fn iter(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Die> {
        self.dice.get(index)
    }

    /// Identifiers in canonical order.
    pub fn ids(&self) -> Vec<DieId> {
        self.dice.iter().map(|die| die.id.clone()).collect()
    }

    /// Canonical index of the die with the given identifier.
    pub fn index_of(&self, id: &DieId) -> Option<usize> {
        self.dice.iter().position(|die| &die.id == id)
    }

    /// Identifiers at the given indices, skipping out-of-range and repeated
    /// indices while keeping the order they were requested in.
    pub fn select(&self, indices: &[usize]) -> Vec<DieId> {
        let mut seen = [false; DICE_COUNT];
        indices
            .iter()
            .filter_map(|&index| {
                let die = self.dice.get(index)?;
                if std::mem::replace(&mut seen[index], true) {
                    return None;
                }
                Some(die.id.clone())
            })
            .collect()
    }

    /// Identifiers of the triangle subset.
    pub fn triangle(&self) -> Vec<DieId> {
        self.select(&TRIANGLE)
    }
}
