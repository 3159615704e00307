//! PostgreSQL booking repository: atomic slot allocation and the
//! booking lifecycle.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;

use pavilion_core::error::AppError;
use pavilion_core::result::AppResult;
use pavilion_core::types::id::{BookingId, VisitorId};
use pavilion_entity::booking::{Booking, NewBooking, PaymentStatus};
use pavilion_entity::slot::{SlotAvailability, SlotConfiguration, SlotType};

use super::{map_db_err, with_read_retry};
use crate::store::BookingStore;

/// Booking repository backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn reserve(&self, new: &NewBooking) -> AppResult<Booking> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_err("begin reservation", e))?;

        // Locking the configuration row serializes every reservation for
        // this (time, type) pair; the capacity count below cannot race.
        let config = sqlx::query_as::<_, SlotConfiguration>(
            "SELECT * FROM slot_configurations \
             WHERE slot_time = $1 AND slot_type = $2 AND active \
             FOR UPDATE",
        )
        .bind(new.slot_time)
        .bind(new.slot_type)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_db_err("lock slot configuration", e))?
        .ok_or_else(|| {
            AppError::not_found("no active slot configuration for the requested time and type")
        })?;

        let held: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings \
             WHERE slot_date = $1 AND slot_time = $2 AND slot_type = $3 \
             AND status IN ('confirmed', 'completed')",
        )
        .bind(new.slot_date)
        .bind(new.slot_time)
        .bind(new.slot_type)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_err("count held bookings", e))?;

        if held >= i64::from(config.max_bookings) {
            // Dropping the transaction rolls it back and releases the lock.
            return Err(AppError::conflict("slot is fully booked"));
        }

        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings \
             (id, visitor_id, slot_date, slot_time, slot_type, party_size, \
              amount_minor, payment_status, status, verification_token, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'confirmed', $9, NOW(), NOW()) \
             RETURNING *",
        )
        .bind(BookingId::new())
        .bind(new.visitor_id)
        .bind(new.slot_date)
        .bind(new.slot_time)
        .bind(new.slot_type)
        .bind(new.party_size)
        .bind(config.price_minor)
        .bind(PaymentStatus::for_amount(config.price_minor))
        .bind(&new.verification_token)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_err("insert booking", e))?;

        tx.commit()
            .await
            .map_err(|e| map_db_err("commit reservation", e))?;

        debug!(
            booking_id = %booking.id,
            slot_date = %booking.slot_date,
            slot_time = %booking.slot_time,
            slot_type = %booking.slot_type,
            held = held + 1,
            max = config.max_bookings,
            "Reservation committed"
        );
        Ok(booking)
    }

    async fn availability(
        &self,
        date: NaiveDate,
        slot_type: SlotType,
    ) -> AppResult<Vec<SlotAvailability>> {
        with_read_retry(|| async {
            sqlx::query_as::<_, SlotAvailability>(
                "SELECT sc.id AS slot_id, $1::date AS slot_date, sc.slot_time, sc.slot_type, \
                        sc.max_bookings, sc.price_minor, \
                        COUNT(b.id) AS booked, \
                        sc.max_bookings - COUNT(b.id) AS remaining \
                 FROM slot_configurations sc \
                 LEFT JOIN bookings b \
                   ON b.slot_time = sc.slot_time AND b.slot_type = sc.slot_type \
                  AND b.slot_date = $1 AND b.status IN ('confirmed', 'completed') \
                 WHERE sc.slot_type = $2 AND sc.active \
                 GROUP BY sc.id, sc.slot_time, sc.slot_type, sc.max_bookings, sc.price_minor \
                 HAVING sc.max_bookings - COUNT(b.id) > 0 \
                 ORDER BY sc.slot_time",
            )
            .bind(date)
            .bind(slot_type)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_err("query availability", e))
        })
        .await
    }

    async fn find_by_id(
        &self,
        visitor: VisitorId,
        booking: BookingId,
    ) -> AppResult<Option<Booking>> {
        with_read_retry(|| async {
            sqlx::query_as::<_, Booking>(
                "SELECT * FROM bookings WHERE id = $1 AND visitor_id = $2",
            )
            .bind(booking)
            .bind(visitor)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_err("find booking", e))
        })
        .await
    }

    async fn find_by_visitor(&self, visitor: VisitorId) -> AppResult<Vec<Booking>> {
        with_read_retry(|| async {
            sqlx::query_as::<_, Booking>(
                "SELECT * FROM bookings WHERE visitor_id = $1 \
                 ORDER BY slot_date DESC, slot_time DESC",
            )
            .bind(visitor)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_err("list visitor bookings", e))
        })
        .await
    }

    async fn cancel(&self, visitor: VisitorId, booking: BookingId) -> AppResult<Booking> {
        // Single guarded statement: the status predicate makes the
        // check-and-transition atomic without an explicit lock.
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'cancelled', updated_at = NOW() \
             WHERE id = $1 AND visitor_id = $2 AND status = 'confirmed' \
             RETURNING *",
        )
        .bind(booking)
        .bind(visitor)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_err("cancel booking", e))?
        .ok_or_else(|| AppError::not_found("booking not found, not owned, or not cancellable"))
    }

    async fn verify(&self, token: &str) -> AppResult<Booking> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_err("begin verification", e))?;

        // The row lock serializes concurrent verifications of one token;
        // exactly one caller sees 'confirmed' here.
        let current = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE verification_token = $1 FOR UPDATE",
        )
        .bind(token)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_db_err("lock booking by token", e))?
        .ok_or_else(|| AppError::not_found("verification token not recognized"))?;

        let next = current.status.try_complete()?;

        let booking = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(current.id)
        .bind(next)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_err("complete booking", e))?;

        tx.commit()
            .await
            .map_err(|e| map_db_err("commit verification", e))?;

        debug!(booking_id = %booking.id, "Booking verified");
        Ok(booking)
    }
}
