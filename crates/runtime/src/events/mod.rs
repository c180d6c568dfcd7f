//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. The [`Topic::Notice`] stream carries the exact text
//! the client shows to the roller.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{Notice, ResultEvent, RollEvent, SetupEvent};
