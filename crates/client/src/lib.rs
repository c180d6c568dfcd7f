//! Stdio client for the dice runtime.
//!
//! # Architecture
//!
//! ```text
//! stdin ──▶ transport::Inbound ──▶ RuntimeHandle ──▶ workers
//!                 │                                     │
//!                 └─ chat ─▶ ChatCommand                │
//!                                                       ▼
//! stdout ◀── LineSink (packets) / event consumers (CHAT notices)
//! ```
//!
//! stdout is reserved for the transport; logs go to a file.

pub mod app;
pub mod command;
pub mod config;
pub mod logging;
pub mod transport;

pub use app::App;
pub use command::ChatCommand;
pub use config::ClientConfig;
pub use transport::{Inbound, LineSink, LineWriter, TransportError};
