//! In-memory booking store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;

use pavilion_core::error::AppError;
use pavilion_core::result::AppResult;
use pavilion_core::types::id::{BookingId, VisitorId};
use pavilion_entity::booking::{Booking, BookingStatus, NewBooking, PaymentStatus};
use pavilion_entity::slot::{SlotAvailability, SlotConfiguration, SlotType};

use crate::store::BookingStore;

#[derive(Debug, Default)]
struct Inner {
    slots: Vec<SlotConfiguration>,
    bookings: HashMap<BookingId, Booking>,
    tokens: HashMap<String, BookingId>,
}

impl Inner {
    fn held(&self, date: NaiveDate, config: &SlotConfiguration) -> i64 {
        self.bookings
            .values()
            .filter(|b| {
                b.slot_date == date
                    && b.slot_time == config.slot_time
                    && b.slot_type == config.slot_type
                    && b.status.counts_toward_capacity()
            })
            .count() as i64
    }
}

/// Booking store backed by a mutex-guarded map.
///
/// The store lock covers every check-then-act section, so the capacity
/// check and insert are linearizable just like the row-locked
/// transaction in the PostgreSQL repository.
#[derive(Debug, Clone, Default)]
pub struct MemoryBookingStore {
    state: Arc<Mutex<Inner>>,
}

impl MemoryBookingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot configuration. Configurations are administered
    /// externally in production; tests insert them directly.
    pub async fn insert_slot(&self, config: SlotConfiguration) {
        self.state.lock().await.slots.push(config);
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn reserve(&self, new: &NewBooking) -> AppResult<Booking> {
        let mut inner = self.state.lock().await;

        let config = inner
            .slots
            .iter()
            .find(|c| c.slot_time == new.slot_time && c.slot_type == new.slot_type && c.active)
            .cloned()
            .ok_or_else(|| {
                AppError::not_found("no active slot configuration for the requested time and type")
            })?;

        if inner.held(new.slot_date, &config) >= i64::from(config.max_bookings) {
            return Err(AppError::conflict("slot is fully booked"));
        }
        if inner.tokens.contains_key(&new.verification_token) {
            return Err(AppError::invariant(
                "verification token collided with an existing booking",
            ));
        }

        let now = Utc::now();
        let booking = Booking {
            id: BookingId::new(),
            visitor_id: new.visitor_id,
            slot_date: new.slot_date,
            slot_time: new.slot_time,
            slot_type: new.slot_type,
            party_size: new.party_size,
            amount_minor: config.price_minor,
            payment_status: PaymentStatus::for_amount(config.price_minor),
            status: BookingStatus::Confirmed,
            verification_token: new.verification_token.clone(),
            created_at: now,
            updated_at: now,
        };
        inner
            .tokens
            .insert(booking.verification_token.clone(), booking.id);
        inner.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn availability(
        &self,
        date: NaiveDate,
        slot_type: SlotType,
    ) -> AppResult<Vec<SlotAvailability>> {
        let inner = self.state.lock().await;
        let mut out: Vec<SlotAvailability> = inner
            .slots
            .iter()
            .filter(|c| c.slot_type == slot_type && c.active)
            .map(|c| {
                let booked = inner.held(date, c);
                SlotAvailability {
                    slot_id: c.id,
                    slot_date: date,
                    slot_time: c.slot_time,
                    slot_type: c.slot_type,
                    max_bookings: c.max_bookings,
                    price_minor: c.price_minor,
                    booked,
                    remaining: i64::from(c.max_bookings) - booked,
                }
            })
            .filter(|a| a.remaining > 0)
            .collect();
        out.sort_by_key(|a| a.slot_time);
        Ok(out)
    }

    async fn find_by_id(
        &self,
        visitor: VisitorId,
        booking: BookingId,
    ) -> AppResult<Option<Booking>> {
        let inner = self.state.lock().await;
        Ok(inner
            .bookings
            .get(&booking)
            .filter(|b| b.visitor_id == visitor)
            .cloned())
    }

    async fn find_by_visitor(&self, visitor: VisitorId) -> AppResult<Vec<Booking>> {
        let inner = self.state.lock().await;
        let mut out: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|b| b.visitor_id == visitor)
            .cloned()
            .collect();
        out.sort_by(|a, b| (b.slot_date, b.slot_time).cmp(&(a.slot_date, a.slot_time)));
        Ok(out)
    }

    async fn cancel(&self, visitor: VisitorId, booking: BookingId) -> AppResult<Booking> {
        let mut inner = self.state.lock().await;
        match inner.bookings.get_mut(&booking) {
            Some(b) if b.visitor_id == visitor && b.status == BookingStatus::Confirmed => {
                b.status = b.status.try_cancel()?;
                b.updated_at = Utc::now();
                Ok(b.clone())
            }
            _ => Err(AppError::not_found(
                "booking not found, not owned, or not cancellable",
            )),
        }
    }

    async fn verify(&self, token: &str) -> AppResult<Booking> {
        let mut inner = self.state.lock().await;
        let id = *inner
            .tokens
            .get(token)
            .ok_or_else(|| AppError::not_found("verification token not recognized"))?;
        let booking = inner
            .bookings
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("verification token not recognized"))?;
        booking.status = booking.status.try_complete()?;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use pavilion_core::error::ErrorKind;
    use pavilion_core::types::id::SlotId;

    use super::*;

    fn slot(max_bookings: i32) -> SlotConfiguration {
        SlotConfiguration {
            id: SlotId::new(),
            slot_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            slot_type: SlotType::Regular,
            max_bookings,
            price_minor: 1500,
            active: true,
            created_at: Utc::now(),
        }
    }

    fn request(token: &str) -> NewBooking {
        NewBooking {
            visitor_id: VisitorId::new(),
            slot_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            slot_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            slot_type: SlotType::Regular,
            party_size: 2,
            verification_token: token.to_string(),
        }
    }

    #[tokio::test]
    async fn test_token_collision_is_an_invariant_breach() {
        let store = MemoryBookingStore::new();
        store.insert_slot(slot(5)).await;

        store.reserve(&request("tok-1")).await.unwrap();
        let err = store.reserve(&request("tok-1")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Invariant);
    }

    #[tokio::test]
    async fn test_cancelled_booking_releases_capacity() {
        let store = MemoryBookingStore::new();
        store.insert_slot(slot(1)).await;

        let first = store.reserve(&request("tok-1")).await.unwrap();
        let err = store.reserve(&request("tok-2")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        store.cancel(first.visitor_id, first.id).await.unwrap();
        store.reserve(&request("tok-3")).await.unwrap();
    }
}
