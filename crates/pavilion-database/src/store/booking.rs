//! Booking store trait: slot allocation and the booking lifecycle.

use async_trait::async_trait;
use chrono::NaiveDate;

use pavilion_core::result::AppResult;
use pavilion_core::types::id::{BookingId, VisitorId};
use pavilion_entity::booking::{Booking, NewBooking};
use pavilion_entity::slot::{SlotAvailability, SlotType};

/// Persistence seam for slot allocation and booking state transitions.
///
/// Implementations must make `reserve` linearizable per
/// (date, time, type) triple and `verify` linearizable per token: two
/// concurrent reservations must never both pass a capacity check with
/// one slot remaining, and exactly one of any number of concurrent
/// verifications of the same token may complete the booking.
#[async_trait]
pub trait BookingStore: Send + Sync + 'static {
    /// Atomically check capacity and create a booking.
    ///
    /// In one atomic unit: locate the active slot configuration for
    /// (time, type) — `NotFound` if absent — count bookings currently
    /// holding capacity for the (date, time, type) triple, compare
    /// against the configured maximum — `Conflict` if full — and insert
    /// the booking with amount and payment status taken from the
    /// configuration. Capacity is always recomputed from the live count;
    /// no decrementing counter exists to drift. A collision on the
    /// verification token surfaces as `Invariant`.
    async fn reserve(&self, new: &NewBooking) -> AppResult<Booking>;

    /// Live remaining capacity per active configuration of the given
    /// type on the given date. Only slots with capacity left are
    /// returned. Derived read; safe to retry.
    async fn availability(
        &self,
        date: NaiveDate,
        slot_type: SlotType,
    ) -> AppResult<Vec<SlotAvailability>>;

    /// Find a booking by id, scoped to its owner.
    async fn find_by_id(
        &self,
        visitor: VisitorId,
        booking: BookingId,
    ) -> AppResult<Option<Booking>>;

    /// All bookings owned by a visitor, most recent slot first.
    async fn find_by_visitor(&self, visitor: VisitorId) -> AppResult<Vec<Booking>>;

    /// Cancel a confirmed booking owned by the visitor.
    ///
    /// `NotFound` unless a booking with that id, owner, and status
    /// `confirmed` exists. Cancellation releases capacity implicitly:
    /// the next live recount simply no longer sees the booking.
    async fn cancel(&self, visitor: VisitorId, booking: BookingId) -> AppResult<Booking>;

    /// Consume a verification token, completing its booking.
    ///
    /// `NotFound` if the token matches no booking; `Conflict` if the
    /// booking is already cancelled or already used. Concurrent calls on
    /// one token are serialized so exactly one completes.
    async fn verify(&self, token: &str) -> AppResult<Booking>;
}
