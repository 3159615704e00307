//! Store traits defining the atomic persistence seam.
//!
//! Every check-then-act sequence the engine relies on (capacity
//! check-and-reserve, single-use verification, position assignment,
//! occupancy overwrite plus crossing detection) happens *inside* a store
//! method, behind whatever arbitration the implementation provides: row
//! locks and transactions for PostgreSQL, a Tokio mutex for the
//! in-memory stores.

pub mod booking;
pub mod crowd;
pub mod queue;

pub use booking::BookingStore;
pub use crowd::CrowdStore;
pub use queue::QueueStore;
