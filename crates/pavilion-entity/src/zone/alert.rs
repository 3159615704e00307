//! Crowd alert entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pavilion_core::types::id::{AlertId, ZoneId};

/// An alert raised when a zone crossed its occupancy threshold.
///
/// At most one unresolved alert exists per zone at a time; a new breach
/// episode only raises a new alert after an operator resolves the open
/// one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Alert {
    /// Unique alert identifier.
    pub id: AlertId,
    /// The zone in breach.
    pub zone_id: ZoneId,
    /// Occupancy at the moment the alert was raised.
    pub occupancy: i32,
    /// The threshold that was crossed.
    pub threshold: i32,
    /// When the alert was raised.
    pub raised_at: DateTime<Utc>,
    /// Whether an operator has resolved the alert.
    pub resolved: bool,
    /// When the alert was resolved.
    pub resolved_at: Option<DateTime<Utc>>,
}
