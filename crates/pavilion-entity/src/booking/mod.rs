//! Booking entities and lifecycle enums.

pub mod model;
pub mod payment;
pub mod status;

pub use model::{Booking, NewBooking, PARTY_SIZE_RANGE};
pub use payment::PaymentStatus;
pub use status::BookingStatus;
