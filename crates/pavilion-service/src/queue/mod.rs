//! Queue ticketing: join, leave, and live standing.

pub mod service;

pub use service::QueueService;
