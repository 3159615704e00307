//! # pavilion-database
//!
//! Persistence layer for Pavilion: the store traits that define the
//! atomic persistence seam, PostgreSQL implementations built on sqlx
//! transactions, and `tokio::sync::Mutex` in-memory implementations for
//! single-node use and deterministic concurrency tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod store;

pub use connection::DatabasePool;
pub use store::{BookingStore, CrowdStore, QueueStore};
