// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use lookout_core::ChatEvent;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::error::TrySendError;

use crate::server::GatewayState;

/// Present on redeliveries of an event Slack considers unacknowledged.
pub const RETRY_HEADER: &str = "x-slack-retry-num";

/// Outer Events API envelope.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Envelope {
    /// Endpoint ownership check sent when the request URL is configured.
    UrlVerification { challenge: String },
    /// A subscribed event.
    EventCallback {
        #[serde(default)]
        event_id: Option<String>,
        event: serde_json::Value,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Serialize)]
pub struct ChallengeResponse {
    pub challenge: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// POST /slack/events
///
/// Acknowledges quickly and hands the inner event to the intake loop. Work
/// happens off the request path so Slack's three-second deadline is met.
pub async fn post_slack_events(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let envelope: Envelope = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(error = %e, "malformed event envelope");
            return error(StatusCode::BAD_REQUEST, "malformed event envelope");
        }
    };

    match envelope {
        Envelope::UrlVerification { challenge } => {
            tracing::info!("answering url verification challenge");
            Json(ChallengeResponse { challenge }).into_response()
        }
        Envelope::EventCallback { event_id, event } => {
            if let Some(retry) = headers.get(RETRY_HEADER) {
                tracing::debug!(?event_id, ?retry, "dropping event redelivery");
                return StatusCode::OK.into_response();
            }

            let event = ChatEvent::from_payload(event_id, event);
            tracing::debug!(event_type = %event.event_type, "event received");
            match state.events_tx.try_send(event) {
                Ok(()) => StatusCode::OK.into_response(),
                Err(TrySendError::Full(event)) => {
                    tracing::warn!(
                        event_type = %event.event_type,
                        "event queue full, dropping event"
                    );
                    StatusCode::OK.into_response()
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::error!("event queue closed");
                    error(StatusCode::SERVICE_UNAVAILABLE, "event intake unavailable")
                }
            }
        }
        Envelope::Unknown => StatusCode::OK.into_response(),
    }
}

/// GET /health
///
/// Unauthenticated liveness probe.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
