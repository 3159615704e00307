//! Event sink implementations.

use tokio::sync::broadcast;
use tracing::debug;

use pavilion_core::events::DomainEvent;
use pavilion_core::traits::EventSink;

/// Fans committed domain events out to in-process subscribers over a
/// Tokio broadcast channel.
///
/// Emission never blocks and never fails the emitting operation: with no
/// subscribers the event is dropped, and a slow subscriber that overruns
/// the channel capacity loses the oldest events, not the emitter.
#[derive(Debug, Clone)]
pub struct EventBroadcaster {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBroadcaster {
    /// Create a broadcaster with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all events emitted from this point on.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

impl EventSink for EventBroadcaster {
    fn emit(&self, event: DomainEvent) {
        // Err means no live receivers; that is not a failure.
        if let Err(e) = self.tx.send(event) {
            debug!(event_id = %e.0.id, "Domain event dropped: no subscribers");
        }
    }
}

/// Sink that discards every event. For tools and tests that do not care
/// about event flow.
#[derive(Debug, Clone, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&self, _event: DomainEvent) {}
}

#[cfg(test)]
mod tests {
    use pavilion_core::events::{EventPayload, QueueEvent};
    use pavilion_core::types::id::QueueId;

    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_emitted_events() {
        let broadcaster = EventBroadcaster::new(8);
        let mut rx = broadcaster.subscribe();

        let queue_id = QueueId::new();
        broadcaster.emit(DomainEvent::new(EventPayload::Queue(QueueEvent::Changed {
            queue_id,
        })));

        let received = rx.recv().await.unwrap();
        let EventPayload::Queue(QueueEvent::Changed { queue_id: got }) = received.payload else {
            panic!("unexpected payload");
        };
        assert_eq!(got, queue_id);
    }

    #[test]
    fn test_emit_without_subscribers_is_a_no_op() {
        let broadcaster = EventBroadcaster::new(8);
        broadcaster.emit(DomainEvent::new(EventPayload::Queue(QueueEvent::Changed {
            queue_id: QueueId::new(),
        })));
    }
}
