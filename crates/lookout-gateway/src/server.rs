// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.

use std::time::Instant;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use lookout_core::{ChatEvent, LookoutError};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::auth::{SigningConfig, slack_signature_middleware};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Channel to the event intake loop.
    pub events_tx: mpsc::Sender<ChatEvent>,
    /// Request signature verification settings.
    pub signing: SigningConfig,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(events_tx: mpsc::Sender<ChatEvent>, signing: SigningConfig) -> Self {
        Self {
            events_tx,
            signing,
            start_time: Instant::now(),
        }
    }
}

/// Gateway server configuration (mirrors the `[gateway]` config section).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Builds the gateway router.
///
/// `/health` is public; `/slack/events` requires a valid Slack signature.
pub fn build_router(state: GatewayState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let slack_routes = Router::new()
        .route("/slack/events", post(handlers::post_slack_events))
        .route_layer(axum_middleware::from_fn_with_state(
            state.signing.clone(),
            slack_signature_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(slack_routes)
        .layer(TraceLayer::new_for_http())
}

/// Serves the gateway until `cancel` fires, then drains in-flight requests.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), LookoutError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| LookoutError::Chat {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| LookoutError::Chat {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server stopped");
    Ok(())
}
