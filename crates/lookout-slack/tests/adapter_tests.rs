// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SlackAdapter tests against a wiremock Web API.

use lookout_config::LookoutConfig;
use lookout_core::traits::{ChatAdapter, PluginAdapter};
use lookout_core::types::HealthStatus;
use lookout_core::LookoutError;
use lookout_slack::SlackAdapter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(base_url: &str) -> LookoutConfig {
    let mut config = LookoutConfig::default();
    config.slack.bot_token = Some("xoxb-test".into());
    config.slack.api_base_url = base_url.to_string();
    config.slack.request_timeout_secs = 5;
    config
}

#[test]
fn missing_token_is_a_config_error() {
    let err = SlackAdapter::new(&LookoutConfig::default())
        .err()
        .expect("should fail without token");
    assert!(matches!(err, LookoutError::Config(_)));
}

#[tokio::test]
async fn fetch_message_returns_first_history_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/conversations.history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "messages": [{"type": "message", "user": "U2", "text": "suspicious login", "ts": "9.1"}]
        })))
        .mount(&server)
        .await;

    let adapter = SlackAdapter::new(&config(&server.uri())).unwrap();
    let msg = adapter.fetch_message("C1", "9.1").await.unwrap();
    assert_eq!(msg.text, "suspicious login");
    assert_eq!(msg.user.as_deref(), Some("U2"));
}

#[tokio::test]
async fn fetch_message_with_empty_history_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/conversations.history"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ok": true, "messages": []})),
        )
        .mount(&server)
        .await;

    let adapter = SlackAdapter::new(&config(&server.uri())).unwrap();
    assert!(adapter.fetch_message("C1", "9.1").await.is_err());
}

#[tokio::test]
async fn health_check_reports_invalid_auth_as_unhealthy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth.test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ok": false, "error": "invalid_auth"})),
        )
        .mount(&server)
        .await;

    let adapter = SlackAdapter::new(&config(&server.uri())).unwrap();
    match adapter.health_check().await.unwrap() {
        HealthStatus::Unhealthy(reason) => assert!(reason.contains("invalid_auth")),
        other => panic!("expected Unhealthy, got {other:?}"),
    }
    assert!(adapter.bot_user_id().await.is_err());
}

#[tokio::test]
async fn post_message_returns_ts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true, "channel": "C1", "ts": "5.5"
        })))
        .mount(&server)
        .await;

    let adapter = SlackAdapter::new(&config(&server.uri())).unwrap();
    assert_eq!(adapter.post_message("C1", "hi").await.unwrap(), "5.5");
}
