//! Axum-based HTTP surface for the rewrite service.
//!
//! Three routes: the rewrite endpoint, a health probe, and a diagnostic
//! cache-stats view. CORS is permissive because the expected caller is a
//! browser editor served from another origin. Body size is capped; request
//! cancellation is left to the upstream call's own timeout.

mod handlers;

use handlers::{handle_adjust_tone, handle_cache_stats, handle_health};

use crate::config::Config;
use crate::providers::MistralClient;
use crate::rewrite::RewriteService;
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;

/// Maximum request body size (64KB) — prevents memory exhaustion.
pub const MAX_BODY_SIZE: usize = 65_536;

/// Shared state for all axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RewriteService>,
    pub started_at: Instant,
}

/// Bind and run the gateway.
pub async fn run_gateway(config: &Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.gateway.host, config.gateway.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let client = Arc::new(MistralClient::new(&config.upstream));
    let service = Arc::new(RewriteService::new(
        client,
        config.upstream.completion_params(),
    ));
    run_gateway_with_listener(listener, service).await
}

/// Run the gateway from a pre-bound listener and a pre-built service.
/// Integration tests bind to port 0 and inject a stubbed upstream.
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    service: Arc<RewriteService>,
) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, upstream_configured = service.upstream_configured(), "gateway listening");

    let state = AppState {
        service,
        started_at: Instant::now(),
    };

    let app = router(state);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/adjust-tone", post(handle_adjust_tone))
        .route("/api/health", get(handle_health))
        .route("/api/cache-stats", get(handle_cache_stats))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(CorsLayer::permissive())
}
