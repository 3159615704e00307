//! Slot configuration entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pavilion_core::types::id::SlotId;

use super::SlotType;

/// Capacity configuration for one bookable (time-of-day, type) unit.
///
/// The configuration is date-independent: every calendar date offers the
/// same set of slots, and capacity is counted against live bookings for
/// the requested date. Administered externally; the core only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SlotConfiguration {
    /// Unique configuration identifier.
    pub id: SlotId,
    /// Time of day the slot admits visitors.
    pub slot_time: NaiveTime,
    /// The kind of entry the slot grants.
    pub slot_type: SlotType,
    /// Hard capacity limit in bookings (not seats).
    pub max_bookings: i32,
    /// Unit price in minor currency units. Zero means free entry.
    pub price_minor: i64,
    /// Whether the slot is currently bookable.
    pub active: bool,
    /// When the configuration was created.
    pub created_at: DateTime<Utc>,
}

/// Live availability for one slot configuration on a specific date.
///
/// `remaining` is always recomputed from the confirmed/completed booking
/// count inside the query that produces it; there is no stored
/// availability counter anywhere that could drift.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SlotAvailability {
    /// The slot configuration this availability is for.
    pub slot_id: SlotId,
    /// The date the availability was computed for.
    pub slot_date: NaiveDate,
    /// Time of day the slot admits visitors.
    pub slot_time: NaiveTime,
    /// The kind of entry the slot grants.
    pub slot_type: SlotType,
    /// Hard capacity limit in bookings.
    pub max_bookings: i32,
    /// Unit price in minor currency units.
    pub price_minor: i64,
    /// Bookings currently counting toward capacity.
    pub booked: i64,
    /// Bookings still available.
    pub remaining: i64,
}
