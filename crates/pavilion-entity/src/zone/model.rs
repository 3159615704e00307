//! Zone entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pavilion_core::types::AlertLevel;
use pavilion_core::types::id::ZoneId;

/// A physical area of the venue tracked for occupancy.
///
/// `current_occupancy` is overwritten by staff occupancy reports.
/// Exceeding `max_capacity` is a soft target, not enforced. The alert
/// level is always derived from the live reading via
/// [`Zone::alert_level`]; it is never stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Zone {
    /// Unique zone identifier.
    pub id: ZoneId,
    /// Display name.
    pub name: String,
    /// Free-form zone classification (administered externally).
    pub zone_type: String,
    /// Physical capacity. Informational; not enforced on reports.
    pub max_capacity: i32,
    /// Latest reported occupancy, non-negative.
    pub current_occupancy: i32,
    /// Occupancy level at which the zone is considered in breach.
    pub alert_threshold: i32,
    /// Whether the zone is in service.
    pub active: bool,
    /// When the zone was created.
    pub created_at: DateTime<Utc>,
}

impl Zone {
    /// Derive the alert level from the current occupancy reading.
    pub fn alert_level(&self) -> AlertLevel {
        AlertLevel::for_occupancy(self.current_occupancy, self.alert_threshold)
    }

    /// Whether the current reading is at or above the alert threshold.
    pub fn in_breach(&self) -> bool {
        self.alert_level().is_breach()
    }
}

/// Result of atomically recording an occupancy report.
///
/// Carries the previous reading taken inside the same atomic section, so
/// the alert evaluator can detect a threshold crossing without a second
/// racy read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyChange {
    /// The zone after the update.
    pub zone: Zone,
    /// The reading that was overwritten.
    pub previous_occupancy: i32,
}

impl OccupancyChange {
    /// Whether this report moved the zone from below its threshold to at
    /// or above it. Reports that stay in breach do not count as a new
    /// crossing.
    pub fn crossed_into_breach(&self) -> bool {
        self.previous_occupancy < self.zone.alert_threshold
            && self.zone.current_occupancy >= self.zone.alert_threshold
    }
}

/// A zone reading paired with its freshly derived alert level, for
/// operator display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneStatus {
    /// The zone reading.
    pub zone: Zone,
    /// Level derived from the reading at query time.
    pub alert_level: AlertLevel,
}

impl From<Zone> for ZoneStatus {
    fn from(zone: Zone) -> Self {
        let alert_level = zone.alert_level();
        Self { zone, alert_level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(occupancy: i32, threshold: i32) -> Zone {
        Zone {
            id: ZoneId::new(),
            name: "Main Hall".to_string(),
            zone_type: "hall".to_string(),
            max_capacity: 500,
            current_occupancy: occupancy,
            alert_threshold: threshold,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_alert_level_is_derived() {
        assert_eq!(zone(100, 100).alert_level(), AlertLevel::Red);
        assert_eq!(zone(70, 100).alert_level(), AlertLevel::Yellow);
        assert_eq!(zone(69, 100).alert_level(), AlertLevel::Green);
    }

    #[test]
    fn test_crossing_detection() {
        let crossed = OccupancyChange {
            zone: zone(120, 100),
            previous_occupancy: 80,
        };
        assert!(crossed.crossed_into_breach());

        let still_in_breach = OccupancyChange {
            zone: zone(130, 100),
            previous_occupancy: 120,
        };
        assert!(!still_in_breach.crossed_into_breach());

        let dropped_out = OccupancyChange {
            zone: zone(50, 100),
            previous_occupancy: 120,
        };
        assert!(!dropped_out.crossed_into_breach());
    }
}
