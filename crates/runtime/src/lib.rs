//! Runtime orchestration for the dice automation.
//!
//! This crate wires the pure logic of `dice-core` into a concurrent runtime:
//! bounded report queues with single consumers, a shared session guarded by
//! locks, paced packet dispatch, and a topic-based event bus. Consumers embed
//! [`Runtime`] and drive it through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - `workers` and `session` stay internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod session;
mod workers;

pub use api::{
    NullSink, Packet, PacketKind, PacketSink, QueueKind, Result, RuntimeError, RuntimeHandle,
    SinkError,
};
pub use events::{Event, EventBus, Notice, ResultEvent, RollEvent, SetupEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use workers::DispatchReport;
