//! # pavilion-service
//!
//! Business logic service layer for Pavilion. Each service orchestrates
//! a store, validates input, and emits domain events for committed state
//! changes.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references, with the stores behind
//! their trait seams so the in-memory and PostgreSQL backends are
//! interchangeable.

pub mod booking;
pub mod crowd;
pub mod events;
pub mod queue;

pub use booking::{BookingPass, BookingService, Reservation, ReserveRequest, TokenService};
pub use crowd::{CrowdService, OccupancyReport};
pub use events::{EventBroadcaster, NullEventSink};
pub use queue::QueueService;
