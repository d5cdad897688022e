//! Structured logging for scamlens.
//!
//! Wraps `tracing` to provide console output plus JSON-formatted rolling
//! file output (NDJSON), with environment-based level control.

pub mod logger;

pub use logger::init_logger;
