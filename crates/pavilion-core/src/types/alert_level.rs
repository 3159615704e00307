//! Derived crowd alert level for a zone.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Crowd alert level derived from a zone's occupancy and threshold.
///
/// This is always computed on demand from the live occupancy reading.
/// It is never stored, so it can never go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// Occupancy is comfortably below the alert threshold.
    Green,
    /// Occupancy has reached 70% of the alert threshold.
    Yellow,
    /// Occupancy has reached or exceeded the alert threshold.
    Red,
}

impl AlertLevel {
    /// Compute the alert level for an occupancy reading against a threshold.
    ///
    /// `red` at `occupancy >= threshold`, `yellow` at
    /// `occupancy >= 0.7 * threshold`, otherwise `green`. The comparison is
    /// done in integer arithmetic (`10 * occupancy >= 7 * threshold`) so the
    /// 0.7 boundary is exact.
    pub fn for_occupancy(occupancy: i32, threshold: i32) -> Self {
        if occupancy >= threshold {
            Self::Red
        } else if 10 * i64::from(occupancy) >= 7 * i64::from(threshold) {
            Self::Yellow
        } else {
            Self::Green
        }
    }

    /// Whether this level indicates a threshold breach.
    pub fn is_breach(&self) -> bool {
        matches!(self, Self::Red)
    }

    /// Return the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_at_threshold() {
        assert_eq!(AlertLevel::for_occupancy(100, 100), AlertLevel::Red);
        assert_eq!(AlertLevel::for_occupancy(150, 100), AlertLevel::Red);
    }

    #[test]
    fn test_yellow_boundary_is_exactly_seventy_percent() {
        assert_eq!(AlertLevel::for_occupancy(70, 100), AlertLevel::Yellow);
        assert_eq!(AlertLevel::for_occupancy(69, 100), AlertLevel::Green);
        assert_eq!(AlertLevel::for_occupancy(99, 100), AlertLevel::Yellow);
        // Boundaries that would round badly in floating point.
        assert_eq!(AlertLevel::for_occupancy(7, 10), AlertLevel::Yellow);
        assert_eq!(AlertLevel::for_occupancy(48, 69), AlertLevel::Green);
        assert_eq!(AlertLevel::for_occupancy(49, 70), AlertLevel::Yellow);
    }

    #[test]
    fn test_green_below() {
        assert_eq!(AlertLevel::for_occupancy(0, 100), AlertLevel::Green);
        assert_eq!(AlertLevel::for_occupancy(10, 100), AlertLevel::Green);
    }

    #[test]
    fn test_zero_threshold_is_always_red() {
        // A zone configured with threshold 0 is permanently in breach.
        assert_eq!(AlertLevel::for_occupancy(0, 0), AlertLevel::Red);
    }
}
