//! Queue entry status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use pavilion_core::AppError;

/// State of one visitor's entry in a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "queue_entry_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QueueEntryStatus {
    /// Waiting in the queue.
    Active,
    /// Left the queue. The position is retired, never reassigned.
    Cancelled,
}

impl QueueEntryStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for QueueEntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QueueEntryStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(AppError::validation(format!(
                "Invalid queue entry status: '{s}'. Expected one of: active, cancelled"
            ))),
        }
    }
}
