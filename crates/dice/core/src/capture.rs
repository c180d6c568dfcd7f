//! State machine that learns the five dice from object reports.
//!
//! ```text
//! Idle ──start──▶ Capturing ──5th die──▶ Complete
//!  ▲                  │                     │
//!  └──stop / abort────┴────────stop─────────┘
//! ```
//!
//! `start` is accepted from every state and always begins from scratch.
//! The session never touches the committed set itself; a completed capture
//! hands the ordered [`DiceSet`] to the owner, which swaps it in.

use crate::layout::{Layout, LayoutError, arrange};
use crate::state::{DICE_COUNT, DiceSet, Die, Position};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CaptureState {
    #[default]
    Idle,
    Capturing,
    Complete,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CaptureError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("observer position unknown when the capture completed")]
    ObserverUnknown,
}

/// Why a report did not change the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum IgnoreReason {
    NotCapturing,
    OutOfReach,
    DuplicateId,
    DuplicatePosition,
}

/// Effect of a single report on the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ingest {
    Ignored(IgnoreReason),
    /// Die appended; `count` dice accumulated so far.
    Accepted { count: usize },
    /// Fifth die appended and the set arranged. Session is now `Complete`.
    Complete { layout: Layout, dice: DiceSet },
    /// Fifth die appended but the set could not be arranged. Session is
    /// back to `Idle`.
    Aborted(CaptureError),
}

#[derive(Clone, Debug, Default)]
pub struct CaptureSession {
    state: CaptureState,
    observer: Option<Position>,
    accumulated: Vec<Die>,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn observer(&self) -> Option<Position> {
        self.observer
    }

    pub fn accumulated(&self) -> &[Die] {
        &self.accumulated
    }

    /// Begins a fresh capture anchored at `observer`, discarding anything
    /// accumulated by an earlier one.
    pub fn start(&mut self, observer: Option<Position>) {
        self.state = CaptureState::Capturing;
        self.observer = observer;
        self.accumulated.clear();
    }

    /// Returns to `Idle` without producing a set.
    pub fn stop(&mut self) {
        self.state = CaptureState::Idle;
        self.accumulated.clear();
    }

    /// Feeds one object report into the session.
    pub fn ingest(&mut self, die: Die) -> Ingest {
        if let Some(reason) = self.rejection(&die) {
            return Ingest::Ignored(reason);
        }

        self.accumulated.push(die);
        if self.accumulated.len() < DICE_COUNT {
            return Ingest::Accepted {
                count: self.accumulated.len(),
            };
        }

        match self.finish() {
            Ok((layout, dice)) => {
                self.state = CaptureState::Complete;
                Ingest::Complete { layout, dice }
            }
            Err(err) => {
                self.stop();
                Ingest::Aborted(err)
            }
        }
    }

    fn rejection(&self, die: &Die) -> Option<IgnoreReason> {
        // A full session has already moved to Complete or back to Idle.
        if self.state != CaptureState::Capturing {
            return Some(IgnoreReason::NotCapturing);
        }
        if let Some(observer) = self.observer
            && !observer.is_adjacent(die.position)
        {
            return Some(IgnoreReason::OutOfReach);
        }
        if self.accumulated.iter().any(|seen| seen.id == die.id) {
            return Some(IgnoreReason::DuplicateId);
        }
        if self
            .accumulated
            .iter()
            .any(|seen| seen.position == die.position)
        {
            return Some(IgnoreReason::DuplicatePosition);
        }
        None
    }

    fn finish(&self) -> Result<(Layout, DiceSet), CaptureError> {
        let observer = self.observer.ok_or(CaptureError::ObserverUnknown)?;
        Ok(arrange(observer, self.accumulated.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tests::dice_for;

    fn feed(session: &mut CaptureSession, dice: Vec<Die>) -> Vec<Ingest> {
        dice.into_iter().map(|die| session.ingest(die)).collect()
    }

    #[test]
    fn five_reports_complete_the_capture() {
        let observer = Position::new(4, 4);
        let mut session = CaptureSession::new();
        session.start(Some(observer));

        let results = feed(&mut session, dice_for(Layout::Left, observer));
        for (i, result) in results.iter().take(4).enumerate() {
            assert_eq!(result, &Ingest::Accepted { count: i + 1 });
        }

        let Ingest::Complete { layout, dice } = &results[4] else {
            panic!("expected completion, got {:?}", results[4]);
        };
        assert_eq!(*layout, Layout::Left);
        assert_eq!(dice.dice().len(), DICE_COUNT);
        assert_eq!(session.state(), CaptureState::Complete);
    }

    #[test]
    fn sixth_report_is_ignored() {
        let observer = Position::new(4, 4);
        let mut session = CaptureSession::new();
        session.start(Some(observer));
        feed(&mut session, dice_for(Layout::Bottom, observer));

        let extra = Die::new("999".parse().unwrap(), Position::new(3, 3));
        assert_eq!(
            session.ingest(extra),
            Ingest::Ignored(IgnoreReason::NotCapturing)
        );
        assert_eq!(session.accumulated().len(), DICE_COUNT);
    }

    #[test]
    fn reports_outside_capture_are_ignored() {
        let observer = Position::new(4, 4);
        let mut session = CaptureSession::new();
        let die = dice_for(Layout::Bottom, observer).remove(0);
        assert_eq!(
            session.ingest(die),
            Ingest::Ignored(IgnoreReason::NotCapturing)
        );
    }

    #[test]
    fn duplicates_and_far_dice_are_filtered() {
        let observer = Position::new(4, 4);
        let mut session = CaptureSession::new();
        session.start(Some(observer));
        let dice = dice_for(Layout::Bottom, observer);

        assert_eq!(
            session.ingest(dice[0].clone()),
            Ingest::Accepted { count: 1 }
        );
        assert_eq!(
            session.ingest(dice[0].clone()),
            Ingest::Ignored(IgnoreReason::DuplicateId)
        );

        let stacked = Die::new("555".parse().unwrap(), dice[0].position);
        assert_eq!(
            session.ingest(stacked),
            Ingest::Ignored(IgnoreReason::DuplicatePosition)
        );

        let far = Die::new("556".parse().unwrap(), Position::new(9, 9));
        assert_eq!(
            session.ingest(far),
            Ingest::Ignored(IgnoreReason::OutOfReach)
        );

        let own_tile = Die::new("557".parse().unwrap(), observer);
        assert_eq!(
            session.ingest(own_tile),
            Ingest::Ignored(IgnoreReason::OutOfReach)
        );
    }

    #[test]
    fn unknown_layout_aborts_to_idle() {
        let observer = Position::new(4, 4);
        let mut session = CaptureSession::new();
        session.start(Some(observer));

        // All eight neighbors are in reach; pick five that form no block.
        let offsets = [(-1, -1), (1, -1), (-1, 1), (1, 1), (0, -1)];
        let dice: Vec<Die> = offsets
            .iter()
            .enumerate()
            .map(|(i, (dx, dy))| {
                Die::new(
                    (10 + i).to_string().parse().unwrap(),
                    Position::new(observer.x + dx, observer.y + dy),
                )
            })
            .collect();

        let last = feed(&mut session, dice).pop();
        assert_eq!(
            last,
            Some(Ingest::Aborted(CaptureError::Layout(LayoutError::Unknown)))
        );
        assert_eq!(session.state(), CaptureState::Idle);
        assert!(session.accumulated().is_empty());
    }

    #[test]
    fn missing_observer_aborts_on_completion() {
        let mut session = CaptureSession::new();
        session.start(None);

        let last = feed(&mut session, dice_for(Layout::Bottom, Position::ORIGIN)).pop();
        assert_eq!(last, Some(Ingest::Aborted(CaptureError::ObserverUnknown)));
        assert_eq!(session.state(), CaptureState::Idle);
    }

    #[test]
    fn stop_discards_partial_capture() {
        let observer = Position::new(4, 4);
        let mut session = CaptureSession::new();
        session.start(Some(observer));
        let mut dice = dice_for(Layout::Top, observer);
        dice.truncate(3);
        feed(&mut session, dice);

        session.stop();
        assert_eq!(session.state(), CaptureState::Idle);
        assert!(session.accumulated().is_empty());
    }

    #[test]
    fn restart_wins_over_previous_session() {
        let observer = Position::new(4, 4);
        let mut session = CaptureSession::new();
        session.start(Some(observer));
        let dice = dice_for(Layout::Right, observer);
        feed(&mut session, dice[..4].to_vec());

        session.start(Some(observer));
        assert_eq!(session.state(), CaptureState::Capturing);
        assert!(session.accumulated().is_empty());
        assert_eq!(
            session.ingest(dice[4].clone()),
            Ingest::Accepted { count: 1 }
        );
    }
}
