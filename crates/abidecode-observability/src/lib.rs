//! # abidecode-observability
//!
//! Structured logging for abidecode.
//!
//! The decoders only emit `tracing` events; this crate owns the subscriber.
//! Logs go to stderr as human-readable text or JSON lines, with the level
//! configurable globally and per crate.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, LogConfig};
