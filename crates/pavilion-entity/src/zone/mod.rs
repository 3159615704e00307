//! Zone, occupancy sample, and alert entities.

pub mod alert;
pub mod model;
pub mod sample;

pub use alert::Alert;
pub use model::{OccupancyChange, Zone, ZoneStatus};
pub use sample::OccupancySample;
