//! Slot configuration entities.

pub mod model;
pub mod slot_type;

pub use model::{SlotAvailability, SlotConfiguration};
pub use slot_type::SlotType;
