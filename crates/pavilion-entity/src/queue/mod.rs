//! Queue ledger entities.

pub mod model;
pub mod status;

pub use model::{QueueEntry, QueueStanding};
pub use status::QueueEntryStatus;
