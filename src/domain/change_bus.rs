//! Broadcast channel for change events.
//!
//! Services publish a [`ChangeEvent`] after each successful mutation of a
//! collection; every WebSocket connection holds its own receiver and
//! forwards the topics its client asked for.

use tokio::sync::broadcast;

use super::ChangeEvent;

/// Broadcast bus for [`ChangeEvent`]s.
///
/// When the ring buffer is full, the oldest events are dropped for lagging
/// receivers.
#[derive(Debug, Clone)]
pub struct ChangeBus {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeBus {
    /// Creates a new `ChangeBus` with the given channel capacity.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Fans `event` out to every live receiver and returns how many got it
    /// (zero when nobody is listening).
    pub fn publish(&self, event: ChangeEvent) -> usize {
        tracing::trace!(event_type = event.event_type_str(), topic = %event.topic(), "publishing change");
        self.sender.send(event).unwrap_or(0)
    }

    /// A receiver that sees events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    /// Live receiver count.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
