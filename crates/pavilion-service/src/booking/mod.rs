//! Booking lifecycle: reservation, cancellation, verification, and the
//! renderable check-in pass.

pub mod pass;
pub mod service;
pub mod token;

pub use pass::BookingPass;
pub use service::{BookingService, Reservation, ReserveRequest};
pub use token::TokenService;
