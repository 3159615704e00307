//! Seam traits implemented by other Pavilion crates.

pub mod event_sink;

pub use event_sink::EventSink;
