//! Payment status flag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment state recorded on a booking.
///
/// The core only records the amount and this flag; settlement is an
/// external concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Payment is due.
    Pending,
    /// Nothing is owed (free slot, or settled externally).
    Completed,
}

impl PaymentStatus {
    /// Initial payment status for a booking of the given amount.
    ///
    /// Free slots are marked completed immediately, matching the observed
    /// booking behavior.
    pub fn for_amount(amount_minor: i64) -> Self {
        if amount_minor > 0 {
            Self::Pending
        } else {
            Self::Completed
        }
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
