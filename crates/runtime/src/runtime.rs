//! High-level runtime orchestrator.
//!
//! The runtime owns the background workers, wires up the report queues and
//! the event bus, and exposes a builder-based API for embedding.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::api::{PacketSink, Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::session::Session;
use crate::workers::{CaptureWorker, Dispatcher, ObjectReport, ResultWorker, ValueReport};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Capacity of the object report queue feeding the capture worker.
    pub report_buffer_size: usize,
    /// Capacity of the value report queue feeding the result worker.
    pub value_buffer_size: usize,
    pub event_buffer_size: usize,
    /// Pause between consecutive packets of one sequence.
    pub dispatch_delay: Duration,
    /// Whether hand notices are sent after a full roll.
    pub poker_messages: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            report_buffer_size: 5,
            value_buffer_size: 5,
            event_buffer_size: 64,
            dispatch_delay: Duration::from_millis(500),
            poker_messages: true,
        }
    }
}

/// Main runtime that orchestrates dice capture, rolls and results
///
/// Design: Runtime owns workers and coordinates execution.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    capture_worker_handle: JoinHandle<()>,
    result_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Workers finish once every handle clone has been dropped and the queued
    /// reports are drained.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.capture_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;
        self.result_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    sink: Option<Arc<dyn PacketSink>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            sink: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the outbound packet sink (required)
    pub fn sink(mut self, sink: impl PacketSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Set an already shared packet sink (required)
    pub fn shared_sink(mut self, sink: Arc<dyn PacketSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Override the pause between packets of one sequence
    pub fn dispatch_delay(mut self, delay: Duration) -> Self {
        self.config.dispatch_delay = delay;
        self
    }

    /// Build the runtime and spawn its workers
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> Result<Runtime> {
        let sink = self.sink.ok_or(RuntimeError::MissingSink)?;
        let config = self.config;

        let (object_tx, object_rx) =
            tokio::sync::mpsc::channel::<ObjectReport>(config.report_buffer_size.max(1));
        let (value_tx, value_rx) =
            tokio::sync::mpsc::channel::<ValueReport>(config.value_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        let session = Arc::new(Session::new(config.poker_messages));

        tracing::debug!(
            "Building runtime: report buffer {}, value buffer {}, dispatch delay {:?}",
            config.report_buffer_size,
            config.value_buffer_size,
            config.dispatch_delay
        );

        let capture_worker = CaptureWorker::new(Arc::clone(&session), object_rx, event_bus.clone());
        let capture_worker_handle = tokio::spawn(async move {
            capture_worker.run().await;
        });

        let result_worker = ResultWorker::new(Arc::clone(&session), value_rx, event_bus.clone());
        let result_worker_handle = tokio::spawn(async move {
            result_worker.run().await;
        });

        let dispatcher = Dispatcher::new(sink, config.dispatch_delay, event_bus.clone());
        let handle = RuntimeHandle::new(session, object_tx, value_tx, dispatcher, event_bus);

        Ok(Runtime {
            handle,
            capture_worker_handle,
            result_worker_handle,
        })
    }
}
