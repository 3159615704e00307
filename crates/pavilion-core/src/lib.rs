//! # pavilion-core
//!
//! Core crate for Pavilion. Contains configuration schemas, typed
//! identifiers, domain events, the derived alert-level function, the
//! event-sink seam, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Pavilion crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
