//! Unified error types surfaced by the runtime API.
//!
//! Dropped reports, unknown layouts and commands without a committed set are
//! handled inside the runtime and never show up here. What remains are
//! wiring failures: a missing sink, closed queues, or a worker that died.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires a packet sink to be configured before building")]
    MissingSink,

    #[error("{queue} report queue closed")]
    QueueClosed { queue: QueueKind },

    #[error("background worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

/// Which inbound queue an error refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum QueueKind {
    Object,
    Value,
}
