//! Shared value types used across the Pavilion crates.

pub mod alert_level;
pub mod id;

pub use alert_level::AlertLevel;
