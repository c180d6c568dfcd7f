//! Sum aggregation for rolls of a subset of the dice.

use std::collections::{BTreeMap, BTreeSet};

use crate::state::DieId;

/// Dice of the active subset roll and the values reported so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingGroup {
    expected: BTreeSet<DieId>,
    results: BTreeMap<DieId, i64>,
}

impl PendingGroup {
    pub fn expected(&self) -> &BTreeSet<DieId> {
        &self.expected
    }

    /// Dice that have not reported yet.
    pub fn pending(&self) -> impl Iterator<Item = &DieId> {
        self.expected
            .iter()
            .filter(|id| !self.results.contains_key(*id))
    }

    fn is_resolved(&self) -> bool {
        self.results.len() == self.expected.len()
    }
}

/// Effect of a value report on the active subset roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// No group active, or the die is not part of it.
    Ignored,
    /// Recorded; other dice are still pending.
    Pending,
    /// Recorded and the group is complete. Carries the sum of its values.
    Resolved(i64),
}

/// Tracks at most one subset roll at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubsetRoll {
    group: Option<PendingGroup>,
}

impl SubsetRoll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new group, discarding any unfinished one.
    pub fn begin(&mut self, ids: impl IntoIterator<Item = DieId>) {
        let expected: BTreeSet<DieId> = ids.into_iter().collect();
        self.group = (!expected.is_empty()).then(|| PendingGroup {
            expected,
            results: BTreeMap::new(),
        });
    }

    /// Records `value` for `id` if it belongs to the active group.
    ///
    /// The group is cleared once it resolves. A repeated report for a die
    /// replaces its earlier value.
    pub fn resolve(&mut self, id: &DieId, value: i64) -> Resolution {
        let Some(group) = self.group.as_mut() else {
            return Resolution::Ignored;
        };
        if !group.expected.contains(id) {
            return Resolution::Ignored;
        }

        group.results.insert(id.clone(), value);
        if !group.is_resolved() {
            return Resolution::Pending;
        }

        let sum = group.results.values().sum();
        self.group = None;
        Resolution::Resolved(sum)
    }

    pub fn is_active(&self) -> bool {
        self.group.is_some()
    }

    pub fn group(&self) -> Option<&PendingGroup> {
        self.group.as_ref()
    }

    pub fn clear(&mut self) {
        self.group = None;
    }
}
