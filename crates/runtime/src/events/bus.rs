//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{Notice, ResultEvent, RollEvent, SetupEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Messages meant for the roller's chat
    Notice,
    /// Capture lifecycle
    Setup,
    /// Outbound packets and sequences
    Roll,
    /// Decoded outcomes
    Result,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Notice, Topic::Setup, Topic::Roll, Topic::Result];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Notice(Notice),
    Setup(SetupEvent),
    Roll(RollEvent),
    Result(ResultEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Notice(_) => Topic::Notice,
            Event::Setup(_) => Topic::Setup,
            Event::Roll(_) => Topic::Roll,
            Event::Result(_) => Topic::Result,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Topics are fixed, so each one owns a channel
/// created up front and no locking is needed to route.
#[derive(Clone)]
pub struct EventBus {
    notice: broadcast::Sender<Event>,
    setup: broadcast::Sender<Event>,
    roll: broadcast::Sender<Event>,
    result: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            notice: broadcast::channel(capacity).0,
            setup: broadcast::channel(capacity).0,
            roll: broadcast::channel(capacity).0,
            result: broadcast::channel(capacity).0,
        }
    }

    fn channel(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Notice => &self.notice,
            Topic::Setup => &self.setup,
            Topic::Roll => &self.roll,
            Topic::Result => &self.result,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channel(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Shorthand for publishing a [`Notice`]
    pub fn notify(&self, notice: Notice) {
        self.publish(Event::Notice(notice));
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channel(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
