//! Slot type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of entry a bookable slot grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "slot_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SlotType {
    /// Standard timed entry.
    Regular,
    /// Shorter-line priority entry at a higher price.
    Priority,
    /// Group entry for organized parties.
    Group,
}

impl SlotType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Priority => "priority",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SlotType {
    type Err = pavilion_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "regular" => Ok(Self::Regular),
            "priority" => Ok(Self::Priority),
            "group" => Ok(Self::Group),
            _ => Err(pavilion_core::AppError::validation(format!(
                "Invalid slot type: '{s}'. Expected one of: regular, priority, group"
            ))),
        }
    }
}
