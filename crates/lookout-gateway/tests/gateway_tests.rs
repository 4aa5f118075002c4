// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router-level tests driven through `tower::ServiceExt::oneshot`.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use lookout_core::ChatEvent;
use lookout_gateway::{GatewayState, SigningConfig, build_router, compute_signature};
use tokio::sync::mpsc;
use tower::ServiceExt;

const SECRET: &str = "test-signing-secret";

fn router(capacity: usize) -> (Router, mpsc::Receiver<ChatEvent>) {
    let (tx, rx) = mpsc::channel(capacity);
    let state = GatewayState::new(tx, SigningConfig::new(SECRET));
    (build_router(state), rx)
}

fn now() -> String {
    unix_now().to_string()
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

fn signed(body: &str, timestamp: &str) -> Request<Body> {
    Request::post("/slack/events")
        .header("content-type", "application/json")
        .header("x-slack-request-timestamp", timestamp)
        .header(
            "x-slack-signature",
            compute_signature(SECRET, timestamp, body.as_bytes()),
        )
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), 1 << 20).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const MENTION: &str = r#"{
    "type": "event_callback",
    "event_id": "Ev42",
    "event": {"type": "app_mention", "user": "U1", "text": "<@U0BOT> hi", "channel": "C1", "ts": "1.0"}
}"#;

#[tokio::test]
async fn url_verification_echoes_challenge() {
    let (app, _rx) = router(4);
    let body = r#"{"type":"url_verification","token":"t","challenge":"3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"}"#;

    let response = app.oneshot(signed(body, &now())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["challenge"],
        "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"
    );
}

#[tokio::test]
async fn event_callback_is_forwarded_to_intake() {
    let (app, mut rx) = router(4);

    let response = app.oneshot(signed(MENTION, &now())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let event = rx.try_recv().unwrap();
    assert_eq!(event.event_type, "app_mention");
    assert_eq!(event.event_id.as_deref(), Some("Ev42"));
    assert_eq!(event.payload["channel"], "C1");
}

#[tokio::test]
async fn redelivery_is_acknowledged_and_dropped() {
    let (app, mut rx) = router(4);
    let mut request = signed(MENTION, &now());
    request
        .headers_mut()
        .insert("x-slack-retry-num", "1".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn full_queue_still_acknowledges() {
    let (tx, mut rx) = mpsc::channel(1);
    let app = build_router(GatewayState::new(tx, SigningConfig::new(SECRET)));

    let first = app.clone().oneshot(signed(MENTION, &now())).await.unwrap();
    let second = app.oneshot(signed(MENTION, &now())).await.unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn closed_queue_is_service_unavailable() {
    let (app, rx) = router(1);
    drop(rx);

    let response = app.oneshot(signed(MENTION, &now())).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn bad_signature_is_rejected() {
    let (app, mut rx) = router(4);
    let mut request = signed(MENTION, &now());
    request
        .headers_mut()
        .insert("x-slack-signature", "v0=deadbeef".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn missing_signature_is_rejected() {
    let (app, _rx) = router(4);
    let request = Request::post("/slack/events")
        .header("content-type", "application/json")
        .body(Body::from(MENTION))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn stale_timestamp_is_rejected() {
    let (app, _rx) = router(4);
    let stale = (unix_now() - 600).to_string();

    let response = app.oneshot(signed(MENTION, &stale)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_envelope_is_bad_request() {
    let (app, _rx) = router(4);

    let response = app.oneshot(signed("not json", &now())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_is_public() {
    let (app, _rx) = router(4);
    let request = Request::get("/health").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}
