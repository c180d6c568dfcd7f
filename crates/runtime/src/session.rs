//! Shared session state and its locking discipline.
//!
//! Every piece of mutable state lives behind its own lock:
//! - `capture` guards the capture state machine.
//! - `committed` guards the current dice set. A successful capture replaces
//!   the whole `Arc` while still holding `capture`, so the commit and the
//!   state transition are observed together.
//! - `subset` and `tally` guard the result side and are never taken together
//!   with `capture`.
//!
//! Lock order, where two are held at once: `capture` before `committed`.
//! Readers clone the `Arc<DiceSet>` out and release the lock before any
//! packet is dispatched.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dice_core::{
    CaptureSession, CaptureState, DICE_COUNT, DiceSet, Die, DieId, HandTally, Ingest, Position,
    Resolution, SubsetRoll,
};
use tokio::sync::{Mutex, RwLock};

/// Where a decoded value ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ValueOutcome {
    /// Die is not part of the committed set (or there is none).
    Unknown,
    /// Recorded into the subset roll; more dice pending.
    SubsetPending,
    /// Completed the subset roll.
    SubsetResolved(i64),
    /// Recorded into the full-roll tally; more dice pending.
    Recorded { index: usize },
    /// Completed the full-roll tally.
    HandComplete([i64; DICE_COUNT]),
}

pub(crate) struct Session {
    capture: Mutex<CaptureSession>,
    committed: RwLock<Option<Arc<DiceSet>>>,
    observer: RwLock<Option<Position>>,
    subset: Mutex<SubsetRoll>,
    tally: Mutex<HandTally>,
    poker_messages: AtomicBool,
}

impl Session {
    pub(crate) fn new(poker_messages: bool) -> Self {
        Self {
            capture: Mutex::new(CaptureSession::new()),
            committed: RwLock::new(None),
            observer: RwLock::new(None),
            subset: Mutex::new(SubsetRoll::new()),
            tally: Mutex::new(HandTally::new()),
            poker_messages: AtomicBool::new(poker_messages),
        }
    }

    pub(crate) async fn set_observer(&self, position: Position) {
        *self.observer.write().await = Some(position);
    }

    pub(crate) async fn observer(&self) -> Option<Position> {
        *self.observer.read().await
    }

    /// Starts a new capture anchored at the last known observer position.
    pub(crate) async fn start_capture(&self) -> Option<Position> {
        let observer = self.observer().await;
        self.capture.lock().await.start(observer);
        self.begin_full_roll().await;
        observer
    }

    /// Stops the capture, returning the state it was in.
    pub(crate) async fn stop_capture(&self) -> CaptureState {
        let mut capture = self.capture.lock().await;
        let previous = capture.state();
        capture.stop();
        previous
    }

    pub(crate) async fn capture_state(&self) -> CaptureState {
        self.capture.lock().await.state()
    }

    /// Feeds a report into the capture and commits a completed set.
    pub(crate) async fn ingest(&self, die: Die) -> Ingest {
        let mut capture = self.capture.lock().await;
        let outcome = capture.ingest(die);

        if let Ingest::Complete { dice, .. } = &outcome {
            *self.committed.write().await = Some(Arc::new(dice.clone()));
        }

        outcome
    }

    pub(crate) async fn committed(&self) -> Option<Arc<DiceSet>> {
        self.committed.read().await.clone()
    }

    /// Prepares for a roll of all five dice: empties the tally and drops any
    /// subset roll still waiting for values.
    pub(crate) async fn begin_full_roll(&self) {
        self.subset.lock().await.clear();
        self.tally.lock().await.reset();
    }

    pub(crate) async fn begin_subset(&self, ids: Vec<DieId>) {
        self.subset.lock().await.begin(ids);
    }

    /// Routes a decoded value to the subset roll or the full-roll tally.
    pub(crate) async fn record_value(&self, id: &DieId, value: i64) -> ValueOutcome {
        match self.subset.lock().await.resolve(id, value) {
            Resolution::Resolved(sum) => return ValueOutcome::SubsetResolved(sum),
            Resolution::Pending => return ValueOutcome::SubsetPending,
            Resolution::Ignored => {}
        }

        let Some(index) = self
            .committed()
            .await
            .and_then(|dice| dice.index_of(id))
        else {
            return ValueOutcome::Unknown;
        };

        match self.tally.lock().await.record(index, value) {
            Some(values) => ValueOutcome::HandComplete(values),
            None => ValueOutcome::Recorded { index },
        }
    }

    pub(crate) fn poker_messages(&self) -> bool {
        self.poker_messages.load(Ordering::Relaxed)
    }

    pub(crate) fn set_poker_messages(&self, enabled: bool) {
        self.poker_messages.store(enabled, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(token: &str) -> DieId {
        token.parse().unwrap()
    }

    async fn committed_session() -> Session {
        let session = Session::new(true);
        let observer = Position::new(4, 4);
        session.set_observer(observer).await;
        session.start_capture().await;
        for (token, x, y) in [("1", 4, 3), ("2", 4, 5), ("3", 5, 3), ("4", 5, 4), ("5", 5, 5)] {
            session
                .ingest(Die::new(id(token), Position::new(x, y)))
                .await;
        }
        session
    }

    #[tokio::test]
    async fn completed_capture_is_committed() {
        let session = committed_session().await;
        assert_eq!(session.capture_state().await, CaptureState::Complete);
        assert!(session.committed().await.is_some());
    }

    #[tokio::test]
    async fn values_fill_the_tally_by_canonical_index() {
        let session = committed_session().await;
        let dice = session.committed().await.unwrap();

        let mut last = ValueOutcome::Unknown;
        for (value, die) in (1..).zip(dice.iter()) {
            last = session.record_value(&die.id, value).await;
        }
        assert_eq!(last, ValueOutcome::HandComplete([1, 2, 3, 4, 5]));
    }

    #[tokio::test]
    async fn subset_values_bypass_the_tally() {
        let session = committed_session().await;
        let dice = session.committed().await.unwrap();
        session.begin_subset(dice.triangle()).await;

        let triangle = dice.triangle();
        assert_eq!(
            session.record_value(&triangle[0], 2).await,
            ValueOutcome::SubsetPending
        );
        assert_eq!(
            session.record_value(&triangle[1], 3).await,
            ValueOutcome::SubsetPending
        );
        assert_eq!(
            session.record_value(&triangle[2], 4).await,
            ValueOutcome::SubsetResolved(9)
        );
    }

    #[tokio::test]
    async fn full_roll_drops_unfinished_subset() {
        let session = committed_session().await;
        let dice = session.committed().await.unwrap();
        session.begin_subset(dice.triangle()).await;
        session.begin_full_roll().await;

        let mut last = ValueOutcome::Unknown;
        for die in dice.iter() {
            last = session.record_value(&die.id, 3).await;
        }
        assert_eq!(last, ValueOutcome::HandComplete([3; 5]));
    }

    #[tokio::test]
    async fn new_capture_drops_unfinished_subset() {
        let session = committed_session().await;
        let dice = session.committed().await.unwrap();
        session.begin_subset(dice.triangle()).await;
        session.start_capture().await;

        assert_eq!(
            session.record_value(&dice.triangle()[0], 4).await,
            ValueOutcome::Recorded { index: 0 }
        );
    }

    #[tokio::test]
    async fn unknown_dice_are_not_recorded() {
        let session = committed_session().await;
        assert_eq!(
            session.record_value(&id("77"), 3).await,
            ValueOutcome::Unknown
        );
    }

    #[tokio::test]
    async fn stop_reports_previous_state() {
        let session = Session::new(false);
        session.start_capture().await;
        assert_eq!(session.stop_capture().await, CaptureState::Capturing);
        assert_eq!(session.stop_capture().await, CaptureState::Idle);
        assert!(!session.poker_messages());
    }
}
