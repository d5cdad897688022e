//! Main HTTP server: router assembly and serve loop.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use scamlens_analysis::AnalysisService;

use crate::rate_limit::CooldownLimiter;
use crate::{analyze_api, control_ui, health_api};

/// Application state shared across routes.
///
/// `analysis` is `None` when no provider credential is configured; the
/// analyze handler reports that as a configuration error without ever
/// attempting an outbound call.
#[derive(Clone)]
pub struct AppState {
    pub limiter: CooldownLimiter,
    pub analysis: Option<Arc<AnalysisService>>,
}

/// Build the Axum router with all routes and layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(control_ui::index))
        .route("/api/analyze", post(analyze_api::analyze))
        .route("/api/health", get(health_api::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn start_server(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = build_router(state);

    info!("scamlens HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
