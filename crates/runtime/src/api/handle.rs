//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides queue plumbing and the session locks. Report
//! methods feed the inbound queues; command methods act on the shared session
//! and, for rolls, wait until every packet of the sequence has been issued.
use std::sync::Arc;

use dice_core::{CaptureState, DICE_COUNT, DiceSet, Position, TRIANGLE};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use super::errors::{QueueKind, Result, RuntimeError};
use super::sink::PacketKind;
use crate::events::{Event, EventBus, Notice, SetupEvent, Topic};
use crate::session::Session;
use crate::workers::{DispatchReport, Dispatcher, ObjectReport, ValueReport};

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    session: Arc<Session>,
    object_tx: mpsc::Sender<ObjectReport>,
    value_tx: mpsc::Sender<ValueReport>,
    dispatcher: Dispatcher,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(
        session: Arc<Session>,
        object_tx: mpsc::Sender<ObjectReport>,
        value_tx: mpsc::Sender<ValueReport>,
        dispatcher: Dispatcher,
        event_bus: EventBus,
    ) -> Self {
        Self {
            session,
            object_tx,
            value_tx,
            dispatcher,
            event_bus,
        }
    }

    /// Record the observer's current tile.
    pub async fn observer_moved(&self, position: Position) {
        self.session.set_observer(position).await;
    }

    /// Queue an object report for the capture worker.
    ///
    /// Waits only while the queue is full; classification happens on the
    /// worker.
    pub async fn object_report(&self, id: impl Into<String>, x: i32, y: i32) -> Result<()> {
        let report = ObjectReport {
            id: id.into(),
            position: Position::new(x, y),
        };
        self.object_tx
            .send(report)
            .await
            .map_err(|_| RuntimeError::QueueClosed {
                queue: QueueKind::Object,
            })
    }

    /// Queue a value report (`id`, obfuscated `raw` value) for the result
    /// worker.
    pub async fn value_report(&self, id: impl Into<String>, raw: impl Into<String>) -> Result<()> {
        let report = ValueReport {
            id: id.into(),
            raw: raw.into(),
        };
        self.value_tx
            .send(report)
            .await
            .map_err(|_| RuntimeError::QueueClosed {
                queue: QueueKind::Value,
            })
    }

    /// Enter setup mode. Any capture in progress is discarded.
    pub async fn start_capture(&self) {
        let observer = self.session.start_capture().await;
        match observer {
            Some(position) => info!("Setup mode enabled at {}", position),
            None => warn!("Setup mode enabled without a known observer position"),
        }

        self.event_bus
            .publish(Event::Setup(SetupEvent::Started { observer }));
        self.event_bus.notify(Notice::SetupEnabled);
    }

    /// Leave setup mode without committing. The previous set stays in use.
    pub async fn stop_capture(&self) {
        let previous = self.session.stop_capture().await;
        if previous == CaptureState::Capturing {
            info!("Setup mode stopped before {} dice were collected", DICE_COUNT);
            self.event_bus.publish(Event::Setup(SetupEvent::Stopped));
        }
    }

    /// Throw every committed die in canonical order.
    pub async fn roll_all(&self) -> DispatchReport {
        let Some(dice) = self.committed_or_log("roll").await else {
            return DispatchReport::default();
        };

        self.session.begin_full_roll().await;
        self.dispatcher
            .issue_sequence(PacketKind::ThrowDice, dice.ids())
            .await
    }

    /// Throw the dice at the given canonical indices and sum their results.
    ///
    /// Out-of-range indices are skipped; repeated indices are thrown once.
    pub async fn roll_subset(&self, indices: &[usize]) -> DispatchReport {
        let Some(dice) = self.committed_or_log("subset roll").await else {
            return DispatchReport::default();
        };

        if let Some(index) = indices.iter().find(|&&index| index >= DICE_COUNT) {
            warn!("Skipping dice index {} outside the committed set", index);
        }

        let targets = dice.select(indices);
        self.session.begin_subset(targets.clone()).await;
        self.dispatcher
            .issue_sequence(PacketKind::ThrowDice, targets)
            .await
    }

    /// Throw the 1st, 3rd and 5th die.
    pub async fn roll_triangle(&self) -> DispatchReport {
        self.roll_subset(&TRIANGLE).await
    }

    /// Switch every committed die off.
    pub async fn close_all(&self) -> DispatchReport {
        let Some(dice) = self.committed_or_log("close").await else {
            return DispatchReport::default();
        };

        self.dispatcher
            .issue_sequence(PacketKind::DiceOff, dice.ids())
            .await
    }

    /// Enable or disable hand notices.
    pub fn set_poker_messages(&self, enabled: bool) {
        self.session.set_poker_messages(enabled);
        self.event_bus.notify(Notice::PokerMessages { enabled });
    }

    /// The committed dice set, if a capture has ever completed.
    pub async fn committed(&self) -> Option<Arc<DiceSet>> {
        self.session.committed().await
    }

    pub async fn capture_state(&self) -> CaptureState {
        self.session.capture_state().await
    }

    pub async fn observer(&self) -> Option<Position> {
        self.session.observer().await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut notices = handle.subscribe(Topic::Notice);
    /// while let Ok(Event::Notice(notice)) = notices.recv().await {
    ///     println!("{notice}");
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    async fn committed_or_log(&self, command: &str) -> Option<Arc<DiceSet>> {
        let dice = self.session.committed().await;
        if dice.is_none() {
            debug!("Ignoring {} command: no dice collected yet", command);
        }
        dice
    }
}
