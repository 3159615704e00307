//! Crowd and occupancy domain events.

use serde::{Deserialize, Serialize};

use crate::types::AlertLevel;
use crate::types::id::{AlertId, ZoneId};

/// Events related to zone occupancy and crowd alerts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CrowdEvent {
    /// A zone's occupancy reading was updated.
    OccupancyChanged {
        /// The zone that was updated.
        zone_id: ZoneId,
        /// The new occupancy reading.
        occupancy: i32,
        /// Alert level derived from the new reading.
        alert_level: AlertLevel,
    },
    /// A zone crossed its alert threshold and an alert was raised.
    AlertRaised {
        /// The zone in breach.
        zone_id: ZoneId,
        /// The alert record that was created.
        alert_id: AlertId,
        /// Occupancy at the moment of the breach.
        occupancy: i32,
        /// The threshold that was crossed.
        threshold: i32,
    },
}
