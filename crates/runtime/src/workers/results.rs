//! Single consumer of value reports.
//!
//! Decodes each reported value and routes it to the subset roll or the
//! full-roll tally, publishing outcomes as they complete.

use std::sync::Arc;

use dice_core::{DieId, HandCategory, decode_for, parse_raw};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::events::{Event, EventBus, Notice, ResultEvent};
use crate::session::{Session, ValueOutcome};

/// Value report as received from the transport.
#[derive(Debug, Clone)]
pub(crate) struct ValueReport {
    pub id: String,
    pub raw: String,
}

pub(crate) struct ResultWorker {
    session: Arc<Session>,
    value_rx: mpsc::Receiver<ValueReport>,
    event_bus: EventBus,
}

impl ResultWorker {
    pub(crate) fn new(
        session: Arc<Session>,
        value_rx: mpsc::Receiver<ValueReport>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            session,
            value_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends once every report sender is gone.
    pub(crate) async fn run(mut self) {
        while let Some(report) = self.value_rx.recv().await {
            self.handle_report(report).await;
        }
        debug!("Value report queue closed, result worker exiting");
    }

    async fn handle_report(&self, report: ValueReport) {
        let decoded = report
            .id
            .parse::<DieId>()
            .and_then(|id| {
                let raw = parse_raw(&report.raw)?;
                Ok((decode_for(&id, raw)?, id))
            });
        let (value, id) = match decoded {
            Ok(decoded) => decoded,
            Err(err) => {
                warn!("Dropping value report {:?}: {}", report, err);
                return;
            }
        };

        match self.session.record_value(&id, value).await {
            ValueOutcome::Unknown => {
                debug!("Ignoring value for die {} outside the committed set", id);
            }
            ValueOutcome::SubsetPending => {
                debug!("Subset roll: die {} rolled {}", id, value);
            }
            ValueOutcome::SubsetResolved(sum) => {
                info!("Subset roll resolved, sum {}", sum);
                self.event_bus
                    .publish(Event::Result(ResultEvent::SubsetResolved { sum }));
                self.event_bus.notify(Notice::SubsetSum(sum));
            }
            ValueOutcome::Recorded { index } => {
                debug!("Die #{} ({}) rolled {}", index, id, value);
            }
            ValueOutcome::HandComplete(values) => self.evaluate(values),
        }
    }

    fn evaluate(&self, values: [i64; dice_core::DICE_COUNT]) {
        let category = HandCategory::classify(&values);
        info!("Hand {:?} evaluated as {}", values, category);

        self.event_bus
            .publish(Event::Result(ResultEvent::HandEvaluated { category, values }));

        if !self.session.poker_messages() {
            return;
        }
        if let Some(notice) = Notice::hand(category) {
            self.event_bus.notify(notice);
        }
    }
}
