//! PostgreSQL store implementations.
//!
//! Atomicity comes from sqlx transactions plus row locks: reservations
//! lock the slot-configuration row, verification locks the booking row,
//! queue joins advance the ledger counter in a single upsert statement,
//! and alert deduplication rides the partial unique index on open
//! alerts.

pub mod booking;
pub mod crowd;
pub mod queue;

pub use booking::BookingRepository;
pub use crowd::CrowdRepository;
pub use queue::QueueRepository;

use std::future::Future;

use pavilion_core::error::{AppError, ErrorKind};
use pavilion_core::result::AppResult;

/// How often an idempotent read is attempted before a transient error
/// is surfaced to the caller.
const READ_ATTEMPTS: u32 = 3;

/// Map an sqlx error into the application error taxonomy.
///
/// Serialization failures, deadlocks, and pool timeouts are `Transient`
/// (safe to retry). A unique violation on the verification token is an
/// `Invariant` breach: token generation is supposed to make collisions
/// negligible, so one occurring means something is wrong enough for an
/// operator to look at. Other unique violations are routine `Conflict`s.
pub(crate) fn map_db_err(context: &str, e: sqlx::Error) -> AppError {
    let (kind, message) = match &e {
        sqlx::Error::PoolTimedOut => (
            ErrorKind::Transient,
            format!("{context}: connection pool timed out"),
        ),
        sqlx::Error::Database(db) => {
            let code = db.code().map(|c| c.to_string()).unwrap_or_default();
            match code.as_str() {
                // serialization_failure, deadlock_detected
                "40001" | "40P01" => (
                    ErrorKind::Transient,
                    format!("{context}: transaction serialization failure"),
                ),
                // unique_violation
                "23505" => {
                    if db.constraint() == Some("bookings_verification_token_key") {
                        (
                            ErrorKind::Invariant,
                            "verification token collided with an existing booking".to_string(),
                        )
                    } else {
                        (
                            ErrorKind::Conflict,
                            format!("{context}: unique constraint violated"),
                        )
                    }
                }
                _ => (ErrorKind::Database, format!("{context}: {db}", db = db.message())),
            }
        }
        _ => (ErrorKind::Database, format!("{context}: {e}")),
    };
    AppError::with_source(kind, message, e)
}

/// Retry an idempotent read a bounded number of times on transient
/// failures. Writes never go through this helper: a write is never
/// blindly retried without knowing whether the original committed.
pub(crate) async fn with_read_retry<T, F, Fut>(mut op: F) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Err(e) if e.is_retryable() && attempt < READ_ATTEMPTS => {
                tracing::debug!(attempt, error = %e, "Retrying idempotent read after transient failure");
                attempt += 1;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_retry_gives_up_after_bounded_attempts() {
        let mut calls = 0u32;
        let result: AppResult<()> = with_read_retry(|| {
            calls += 1;
            async { Err(AppError::transient("flaky")) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls, READ_ATTEMPTS);
    }

    #[tokio::test]
    async fn test_read_retry_does_not_retry_conflicts() {
        let mut calls = 0u32;
        let result: AppResult<()> = with_read_retry(|| {
            calls += 1;
            async { Err(AppError::conflict("slot is fully booked")) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
