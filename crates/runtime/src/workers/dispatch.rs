//! Paced fan-out of packets with a fan-in completion barrier.
//!
//! Each packet of a sequence is sent from its own task so a slow sink call
//! never holds up the pacing of the next one. The caller waits until every
//! task has signalled, but completion order across tasks is not defined.

use std::sync::Arc;
use std::time::Duration;

use dice_core::DieId;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{Packet, PacketKind, PacketSink, SinkError};
use crate::events::{Event, EventBus, RollEvent};

/// Outcome of one dispatched sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Packets the sink accepted.
    pub issued: usize,
    /// Packets the sink rejected.
    pub failed: usize,
}

impl DispatchReport {
    pub fn total(&self) -> usize {
        self.issued + self.failed
    }
}

/// Issues packet sequences through the configured sink.
#[derive(Clone)]
pub(crate) struct Dispatcher {
    sink: Arc<dyn PacketSink>,
    delay: Duration,
    event_bus: EventBus,
}

impl Dispatcher {
    pub(crate) fn new(sink: Arc<dyn PacketSink>, delay: Duration, event_bus: EventBus) -> Self {
        Self {
            sink,
            delay,
            event_bus,
        }
    }

    /// Sends one `kind` packet per target, in order, `delay` apart.
    ///
    /// Returns once every packet has signalled completion.
    pub(crate) async fn issue_sequence(&self, kind: PacketKind, targets: Vec<DieId>) -> DispatchReport {
        if targets.is_empty() {
            return DispatchReport::default();
        }

        let (done_tx, mut done_rx) =
            mpsc::channel::<(DieId, Result<(), SinkError>)>(targets.len());

        for (i, die) in targets.into_iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.delay).await;
            }

            let sink = Arc::clone(&self.sink);
            let done = done_tx.clone();
            tokio::spawn(async move {
                let result = sink.send(Packet::new(kind, die.clone())).await;
                if done.send((die, result)).await.is_err() {
                    debug!("Completion barrier dropped before {} signalled", kind);
                }
            });
        }
        drop(done_tx);

        let mut report = DispatchReport::default();
        while let Some((die, result)) = done_rx.recv().await {
            match result {
                Ok(()) => {
                    report.issued += 1;
                    debug!("Sent {} packet for ID: {}", kind, die);
                    self.event_bus
                        .publish(Event::Roll(RollEvent::PacketIssued { kind, die }));
                }
                Err(err) => {
                    report.failed += 1;
                    warn!("Failed to send {} packet for ID {}: {}", kind, die, err);
                }
            }
        }

        info!(
            "All {} packets sent ({} issued, {} failed)",
            kind, report.issued, report.failed
        );
        self.event_bus
            .publish(Event::Roll(RollEvent::SequenceCompleted { kind, report }));

        report
    }
}
