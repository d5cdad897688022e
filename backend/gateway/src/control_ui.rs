//! Embedded browser client.
//!
//! The whole form controller — text/image tabs, upload checks, data URL
//! conversion, the single fetch with a 60 s abort timeout, and verdict
//! rendering — is one static page baked into the binary.

use axum::response::Html;

/// Handler for `GET /`.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}
