//! Domain events emitted by Pavilion operations.
//!
//! The core emits one event per observable state change; the real-time
//! distribution layer (out of scope here) owns the subscription topology
//! and republishes them to interested observers.

pub mod crowd;
pub mod queue;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use crowd::CrowdEvent;
pub use queue::QueueEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A queue-related event.
    Queue(QueueEvent),
    /// A crowd/occupancy-related event.
    Crowd(CrowdEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AlertLevel;
    use crate::types::id::ZoneId;

    #[test]
    fn test_event_serializes_with_domain_tag() {
        let event = DomainEvent::new(EventPayload::Crowd(CrowdEvent::OccupancyChanged {
            zone_id: ZoneId::new(),
            occupancy: 42,
            alert_level: AlertLevel::Green,
        }));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["payload"]["domain"], "Crowd");
        assert_eq!(json["payload"]["event"]["type"], "OccupancyChanged");
    }
}
