//! Emit hook for domain events.

use crate::events::DomainEvent;

/// Sink through which the core hands state-change events to the external
/// distribution layer.
///
/// Emission is fire-and-forget from the core's point of view: the
/// operation that produced the event has already committed, and delivery
/// guarantees (at-least-once republication, subscription topology) belong
/// to the downstream transport.
pub trait EventSink: Send + Sync + 'static {
    /// Hand one event to the distribution layer.
    fn emit(&self, event: DomainEvent);
}
