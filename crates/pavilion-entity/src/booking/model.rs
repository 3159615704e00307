//! Booking entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pavilion_core::types::id::{BookingId, VisitorId};

use super::{BookingStatus, PaymentStatus};
use crate::slot::SlotType;

/// Allowed party sizes per booking (inclusive).
///
/// Party size is informational: capacity is counted per booking, not per
/// seat. Kept as observed pending product clarification.
pub const PARTY_SIZE_RANGE: std::ops::RangeInclusive<i32> = 1..=10;

/// One reservation of slot capacity.
///
/// Created only through the booking lifecycle; mutated only by the
/// cancel and check-in transitions; never deleted. A cancelled booking
/// stays on record but stops counting toward its slot's capacity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: BookingId,
    /// The visitor who owns the booking.
    pub visitor_id: VisitorId,
    /// Calendar date of the reserved slot.
    pub slot_date: NaiveDate,
    /// Time of day of the reserved slot.
    pub slot_time: NaiveTime,
    /// The kind of entry reserved.
    pub slot_type: SlotType,
    /// Number of people covered by the booking (1-10).
    pub party_size: i32,
    /// Amount recorded at reservation time, in minor currency units.
    pub amount_minor: i64,
    /// Payment state flag. Settlement is external.
    pub payment_status: PaymentStatus,
    /// Lifecycle state.
    pub status: BookingStatus,
    /// Opaque single-use check-in token, unique across all bookings.
    pub verification_token: String,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last mutated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a booking through the slot allocator.
///
/// The verification token is generated by the lifecycle before the
/// atomic reservation; the amount and payment status are filled in from
/// the slot configuration inside the same transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    /// The visitor making the reservation.
    pub visitor_id: VisitorId,
    /// Requested slot date.
    pub slot_date: NaiveDate,
    /// Requested slot time of day.
    pub slot_time: NaiveTime,
    /// Requested entry kind.
    pub slot_type: SlotType,
    /// Number of people covered (1-10, validated upstream).
    pub party_size: i32,
    /// Pre-generated verification token.
    pub verification_token: String,
}
