//! Booking lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use pavilion_core::AppError;

/// Lifecycle state of a booking.
///
/// The machine is `confirmed -> completed` (check-in) and
/// `confirmed -> cancelled`; both targets are terminal and no transition
/// is reversible. All mutation goes through the explicit transition
/// functions below so an illegal transition cannot be written by
/// accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Reserved and holding capacity.
    Confirmed,
    /// Checked in; the verification token has been consumed.
    Completed,
    /// Cancelled by the owner; no longer counts toward capacity.
    Cancelled,
}

impl BookingStatus {
    /// Attempt the check-in transition.
    ///
    /// Only `confirmed` bookings can complete. The error messages
    /// distinguish the two terminal states for on-site staff.
    pub fn try_complete(self) -> Result<Self, AppError> {
        match self {
            Self::Confirmed => Ok(Self::Completed),
            Self::Cancelled => Err(AppError::conflict("booking has been cancelled")),
            Self::Completed => Err(AppError::conflict("booking already used")),
        }
    }

    /// Attempt the cancellation transition.
    pub fn try_cancel(self) -> Result<Self, AppError> {
        match self {
            Self::Confirmed => Ok(Self::Cancelled),
            Self::Cancelled => Err(AppError::conflict("booking is already cancelled")),
            Self::Completed => Err(AppError::conflict("booking has already been used")),
        }
    }

    /// Whether a booking in this state consumes slot capacity.
    ///
    /// Capacity is recomputed from live counts of these states; cancelled
    /// bookings simply stop counting.
    pub fn counts_toward_capacity(self) -> bool {
        matches!(self, Self::Confirmed | Self::Completed)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(AppError::validation(format!(
                "Invalid booking status: '{s}'. Expected one of: confirmed, completed, cancelled"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pavilion_core::error::ErrorKind;

    #[test]
    fn test_complete_only_from_confirmed() {
        assert_eq!(
            BookingStatus::Confirmed.try_complete().unwrap(),
            BookingStatus::Completed
        );
        assert_eq!(
            BookingStatus::Completed.try_complete().unwrap_err().kind,
            ErrorKind::Conflict
        );
        assert_eq!(
            BookingStatus::Cancelled.try_complete().unwrap_err().kind,
            ErrorKind::Conflict
        );
    }

    #[test]
    fn test_cancel_only_from_confirmed() {
        assert_eq!(
            BookingStatus::Confirmed.try_cancel().unwrap(),
            BookingStatus::Cancelled
        );
        assert!(BookingStatus::Completed.try_cancel().is_err());
        assert!(BookingStatus::Cancelled.try_cancel().is_err());
    }

    #[test]
    fn test_capacity_counting() {
        assert!(BookingStatus::Confirmed.counts_toward_capacity());
        assert!(BookingStatus::Completed.counts_toward_capacity());
        assert!(!BookingStatus::Cancelled.counts_toward_capacity());
    }
}
