//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use runtime::{Event, Notice, Packet, PacketSink, Runtime, RuntimeConfig, RuntimeHandle, SinkError};
use tokio::sync::broadcast;

pub const OBSERVER: (i32, i32) = (4, 4);

/// Bottom layout around [`OBSERVER`]; canonical order is 100, 102, 103, 104, 101.
pub const BOTTOM: [(&str, i32, i32); 5] = [
    ("100", 4, 3),
    ("101", 4, 5),
    ("102", 5, 3),
    ("103", 5, 4),
    ("104", 5, 5),
];

pub const WAIT: Duration = Duration::from_secs(2);

/// Records every packet it receives, optionally rejecting some ids.
#[derive(Clone, Default)]
pub struct RecordingSink {
    packets: Arc<Mutex<Vec<Packet>>>,
    rejected: Arc<BTreeSet<String>>,
}

impl RecordingSink {
    pub fn rejecting(ids: &[&str]) -> Self {
        Self {
            packets: Arc::default(),
            rejected: Arc::new(ids.iter().map(|id| id.to_string()).collect()),
        }
    }

    pub fn packets(&self) -> Vec<String> {
        self.packets
            .lock()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn clear(&self) {
        self.packets.lock().unwrap().clear();
    }
}

#[async_trait]
impl PacketSink for RecordingSink {
    async fn send(&self, packet: Packet) -> Result<(), SinkError> {
        if self.rejected.contains(packet.die.as_str()) {
            return Err(SinkError::new(format!("refused {}", packet.die)));
        }
        self.packets.lock().unwrap().push(packet);
        Ok(())
    }
}

pub fn start(sink: RecordingSink) -> Runtime {
    start_with(sink, RuntimeConfig::default())
}

pub fn start_with(sink: RecordingSink, config: RuntimeConfig) -> Runtime {
    Runtime::builder()
        .config(config)
        .dispatch_delay(Duration::from_millis(1))
        .sink(sink)
        .build()
        .expect("runtime should build")
}

/// Waits for the next notice, skipping events from other topics.
pub async fn next_notice(rx: &mut broadcast::Receiver<Event>) -> Notice {
    loop {
        let event = tokio::time::timeout(WAIT, rx.recv())
            .await
            .expect("timed out waiting for a notice")
            .expect("notice channel closed");
        if let Event::Notice(notice) = event {
            return notice;
        }
    }
}

/// Waits until `expected` shows up on the notice stream.
pub async fn expect_notice(rx: &mut broadcast::Receiver<Event>, expected: Notice) {
    loop {
        let notice = next_notice(rx).await;
        if notice == expected {
            return;
        }
    }
}

/// Runs a full capture of [`BOTTOM`] and waits until it is committed.
pub async fn capture_bottom(handle: &RuntimeHandle) {
    let mut notices = handle.subscribe(runtime::Topic::Notice);
    handle
        .observer_moved(dice_core::Position::new(OBSERVER.0, OBSERVER.1))
        .await;
    handle.start_capture().await;
    for (id, x, y) in BOTTOM {
        handle.object_report(id, x, y).await.unwrap();
    }
    expect_notice(&mut notices, Notice::SetupComplete).await;
}

/// Obfuscates `value` the way the room reports it for die `id`.
pub fn raw(id: &str, value: i64) -> String {
    (value + id.parse::<i64>().unwrap() * dice_core::VALUE_OFFSET).to_string()
}
