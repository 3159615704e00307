//! In-memory store implementations using Tokio mutexes.
//!
//! Suitable for single-node deployments and for deterministic
//! concurrency tests: every check-then-act section runs under the store
//! lock, which provides the same linearizability per contended key as
//! the PostgreSQL row locks.

pub mod booking;
pub mod crowd;
pub mod queue;

pub use booking::MemoryBookingStore;
pub use crowd::MemoryCrowdStore;
pub use queue::MemoryQueueStore;
