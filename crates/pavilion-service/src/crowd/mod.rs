//! Crowd monitoring: occupancy reports, zone status, and alerts.

pub mod service;

pub use service::{CrowdService, OccupancyReport};
