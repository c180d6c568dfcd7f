//! Single consumer of object reports.
//!
//! Drains the bounded object queue and feeds each report into the shared
//! capture session. Malformed identifiers are dropped here; they never reach
//! the state machine.

use std::sync::Arc;

use dice_core::{Die, DieId, Ingest, Position};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::events::{Event, EventBus, Notice, SetupEvent};
use crate::session::Session;

/// Object report as received from the transport.
#[derive(Debug, Clone)]
pub(crate) struct ObjectReport {
    pub id: String,
    pub position: Position,
}

pub(crate) struct CaptureWorker {
    session: Arc<Session>,
    report_rx: mpsc::Receiver<ObjectReport>,
    event_bus: EventBus,
}

impl CaptureWorker {
    pub(crate) fn new(
        session: Arc<Session>,
        report_rx: mpsc::Receiver<ObjectReport>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            session,
            report_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends once every report sender is gone.
    pub(crate) async fn run(mut self) {
        while let Some(report) = self.report_rx.recv().await {
            self.handle_report(report).await;
        }
        debug!("Object report queue closed, capture worker exiting");
    }

    async fn handle_report(&self, report: ObjectReport) {
        let id = match report.id.parse::<DieId>() {
            Ok(id) => id,
            Err(err) => {
                warn!("Error parsing dice ID: {}", err);
                return;
            }
        };

        let die = Die::new(id, report.position);
        match self.session.ingest(die.clone()).await {
            Ingest::Ignored(reason) => {
                debug!("Ignoring object report for {} ({})", die.id, reason);
                self.event_bus
                    .publish(Event::Setup(SetupEvent::ReportIgnored { die, reason }));
            }
            Ingest::Accepted { count } => {
                info!(
                    "Dice ID captured: {} at {} ({}/{})",
                    die.id,
                    die.position,
                    count,
                    dice_core::DICE_COUNT
                );
                self.event_bus
                    .publish(Event::Setup(SetupEvent::DieCaptured { die, count }));
            }
            Ingest::Complete { layout, dice } => {
                info!("Detected layout: {}", layout);
                for (index, die) in dice.iter().enumerate() {
                    info!("Collected dice ID #{}: {} at {}", index, die.id, die.position);
                }
                self.event_bus
                    .publish(Event::Setup(SetupEvent::Finished { layout, dice }));
                self.event_bus.notify(Notice::SetupComplete);
            }
            Ingest::Aborted(error) => {
                warn!("Dice capture aborted: {}", error);
                self.event_bus
                    .publish(Event::Setup(SetupEvent::Aborted { error }));
                self.event_bus.notify(Notice::UnknownLayout);
            }
        }
    }
}
