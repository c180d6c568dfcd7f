//! Worker tasks that back the runtime orchestration.
//!
//! The capture and result workers each own one inbound queue and are its only
//! consumer. The dispatcher is not a long-lived task; it spawns one short task
//! per packet and joins them before returning.

mod capture;
mod dispatch;
mod results;

pub(crate) use capture::{CaptureWorker, ObjectReport};
pub(crate) use dispatch::Dispatcher;
pub use dispatch::DispatchReport;
pub(crate) use results::{ResultWorker, ValueReport};
