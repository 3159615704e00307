//! Booking lifecycle service.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::info;

use pavilion_core::error::AppError;
use pavilion_core::result::AppResult;
use pavilion_core::types::id::{BookingId, VisitorId};
use pavilion_database::BookingStore;
use pavilion_entity::booking::{Booking, BookingStatus, NewBooking, PARTY_SIZE_RANGE};
use pavilion_entity::slot::{SlotAvailability, SlotType};

use super::pass::{self, BookingPass};
use super::token::TokenService;

/// Request to reserve slot capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveRequest {
    /// Requested slot date.
    pub slot_date: NaiveDate,
    /// Requested slot time of day.
    pub slot_time: NaiveTime,
    /// Requested entry kind.
    pub slot_type: SlotType,
    /// Number of people covered by the booking.
    pub party_size: i32,
}

/// A confirmed reservation with its renderable check-in pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// The booking that was created.
    pub booking: Booking,
    /// The check-in pass presented at the gate.
    pub pass: BookingPass,
}

/// Orchestrates the booking lifecycle over the allocation store.
///
/// The service validates input and generates the verification token;
/// the store owns atomicity of the capacity check and every state
/// transition.
#[derive(Clone)]
pub struct BookingService {
    /// Booking store.
    store: Arc<dyn BookingStore>,
    /// Token service for verification tokens.
    tokens: Arc<TokenService>,
}

impl std::fmt::Debug for BookingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingService").finish()
    }
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(store: Arc<dyn BookingStore>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    /// Reserve capacity in a slot for a visitor.
    ///
    /// Returns the booking together with its rendered check-in pass.
    /// Fails with `Validation` for an out-of-range party size before the
    /// store is touched; `NotFound` when no active configuration matches
    /// the requested time and type; `Conflict` when the slot is full.
    pub async fn reserve(&self, visitor: VisitorId, req: ReserveRequest) -> AppResult<Reservation> {
        if !PARTY_SIZE_RANGE.contains(&req.party_size) {
            return Err(AppError::validation(format!(
                "party size must be between {} and {}",
                PARTY_SIZE_RANGE.start(),
                PARTY_SIZE_RANGE.end()
            )));
        }

        let new = NewBooking {
            visitor_id: visitor,
            slot_date: req.slot_date,
            slot_time: req.slot_time,
            slot_type: req.slot_type,
            party_size: req.party_size,
            verification_token: self.tokens.generate_token(),
        };
        let booking = self.store.reserve(&new).await?;

        info!(
            booking_id = %booking.id,
            visitor_id = %visitor,
            slot_date = %booking.slot_date,
            slot_time = %booking.slot_time,
            slot_type = %booking.slot_type,
            "Booking confirmed"
        );
        let pass = pass::render_pass(booking.id, &booking.verification_token)?;
        Ok(Reservation { booking, pass })
    }

    /// Slots of the given type with remaining capacity on the date.
    pub async fn availability(
        &self,
        date: NaiveDate,
        slot_type: SlotType,
    ) -> AppResult<Vec<SlotAvailability>> {
        self.store.availability(date, slot_type).await
    }

    /// All bookings owned by the visitor, most recent slot first.
    pub async fn bookings_for(&self, visitor: VisitorId) -> AppResult<Vec<Booking>> {
        self.store.find_by_visitor(visitor).await
    }

    /// One booking by id, scoped to its owner.
    pub async fn booking(&self, visitor: VisitorId, booking: BookingId) -> AppResult<Booking> {
        self.store
            .find_by_id(visitor, booking)
            .await?
            .ok_or_else(|| AppError::not_found("booking not found"))
    }

    /// Cancel a confirmed booking, releasing its slot capacity.
    pub async fn cancel(&self, visitor: VisitorId, booking: BookingId) -> AppResult<Booking> {
        let cancelled = self.store.cancel(visitor, booking).await?;
        info!(booking_id = %cancelled.id, visitor_id = %visitor, "Booking cancelled");
        Ok(cancelled)
    }

    /// Consume a verification token at the gate, completing the booking.
    ///
    /// Of any number of concurrent calls with the same token, exactly one
    /// succeeds; the rest see `Conflict`.
    pub async fn verify(&self, token: &str) -> AppResult<Booking> {
        let booking = self.store.verify(token).await?;
        info!(booking_id = %booking.id, "Booking checked in");
        Ok(booking)
    }

    /// Render the check-in pass for a confirmed booking.
    pub async fn pass(&self, visitor: VisitorId, booking: BookingId) -> AppResult<BookingPass> {
        let booking = self.booking(visitor, booking).await?;
        if booking.status != BookingStatus::Confirmed {
            return Err(AppError::conflict(
                "pass is only available for confirmed bookings",
            ));
        }
        pass::render_pass(booking.id, &booking.verification_token)
    }
}
