//! `GET /api/health`.

use axum::Json;
use serde_json::{Value, json};

/// Health check endpoint.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "scamlens",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
