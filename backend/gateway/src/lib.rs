//! `scamlens-gateway` — the HTTP surface of scamlens.
//!
//! One analysis endpoint plus a health check and the embedded browser
//! client. Every failure is converted to a JSON error body at this
//! boundary; nothing here crashes the process.

pub mod analyze_api;
pub mod control_ui;
pub mod health_api;
pub mod rate_limit;
pub mod server;

pub use rate_limit::CooldownLimiter;
pub use server::{AppState, build_router, start_server};
