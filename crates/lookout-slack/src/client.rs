// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Slack Web API.
//!
//! Provides [`SlackClient`] which handles bearer authentication, `ok: false`
//! error envelopes, and a single retry on transient errors (429, 500, 503).

use std::time::Duration;

use lookout_core::LookoutError;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, RETRY_AFTER};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::{ApiStatus, AuthTestResponse, HistoryResponse, PostMessageRequest, PostMessageResponse};

/// Longest `Retry-After` the client is willing to honour before its one retry.
const MAX_RETRY_AFTER: Duration = Duration::from_secs(5);

/// HTTP client for Slack Web API communication.
#[derive(Debug, Clone)]
pub struct SlackClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl SlackClient {
    /// Creates a new client.
    ///
    /// `base_url` is the Web API root, e.g. `https://slack.com/api`.
    pub fn new(bot_token: &str, base_url: &str, timeout: Duration) -> Result<Self, LookoutError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {bot_token}")).map_err(|e| {
                LookoutError::Config(format!("invalid Slack bot token header value: {e}"))
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| LookoutError::Chat {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: 1,
        })
    }

    /// `auth.test`: identity of the token's bot user.
    pub async fn auth_test(&self) -> Result<AuthTestResponse, LookoutError> {
        let url = self.method_url("auth.test")?;
        self.send(|| self.client.post(url.clone())).await
    }

    /// `chat.postMessage`: posts plain text to a channel.
    pub async fn post_message(&self, channel: &str, text: &str) -> Result<PostMessageResponse, LookoutError> {
        let url = self.method_url("chat.postMessage")?;
        let body = PostMessageRequest { channel, text };
        self.send(|| self.client.post(url.clone()).json(&body)).await
    }

    /// `conversations.history` narrowed to the single message at `ts`.
    ///
    /// Both ends of the window are pinned to `ts`, inclusive, so the reply
    /// holds that message and nothing newer.
    pub async fn message_at(&self, channel: &str, ts: &str) -> Result<HistoryResponse, LookoutError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/conversations.history", self.base_url),
            &[
                ("channel", channel),
                ("oldest", ts),
                ("latest", ts),
                ("inclusive", "true"),
                ("limit", "1"),
            ],
        )
        .map_err(|e| LookoutError::Config(format!("invalid Slack API URL: {e}")))?;
        self.send(|| self.client.get(url.clone())).await
    }

    fn method_url(&self, method: &str) -> Result<reqwest::Url, LookoutError> {
        reqwest::Url::parse(&format!("{}/{method}", self.base_url))
            .map_err(|e| LookoutError::Config(format!("invalid Slack API URL: {e}")))
    }

    /// Sends a request built by `build`, retrying once on a transient status.
    async fn send<T, F>(&self, build: F) -> Result<T, LookoutError>
    where
        T: DeserializeOwned,
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            let response = build().send().await.map_err(|e| {
                if e.is_timeout() {
                    LookoutError::Chat {
                        message: "Slack request timed out".to_string(),
                        source: Some(Box::new(e)),
                    }
                } else {
                    LookoutError::Chat {
                        message: format!("HTTP request failed: {e}"),
                        source: Some(Box::new(e)),
                    }
                }
            })?;

            let status = response.status();
            debug!(status = %status, attempt, url = %response.url().path(), "Slack response received");

            if is_transient_error(status) && attempt < self.max_retries {
                let delay = retry_after(response.headers()).unwrap_or(Duration::from_secs(1));
                warn!(status = %status, delay_ms = delay.as_millis() as u64, "transient Slack error, will retry");
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            let body = response.text().await.map_err(|e| LookoutError::Chat {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;

            if !status.is_success() {
                return Err(LookoutError::chat(format!("Slack API returned {status}: {body}")));
            }

            return parse_body(&body);
        }
    }
}

/// Checks the `ok` envelope, then decodes the method-specific fields.
fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, LookoutError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| LookoutError::Chat {
        message: format!("failed to parse Slack response: {e}"),
        source: Some(Box::new(e)),
    })?;

    let status: ApiStatus = serde_json::from_value(value.clone()).map_err(|e| LookoutError::Chat {
        message: format!("Slack response has no `ok` field: {e}"),
        source: Some(Box::new(e)),
    })?;
    if !status.ok {
        let error = status.error.unwrap_or_else(|| "unknown_error".to_string());
        return Err(LookoutError::chat(format!("Slack API error: {error}")));
    }

    serde_json::from_value(value).map_err(|e| LookoutError::Chat {
        message: format!("unexpected Slack response shape: {e}"),
        source: Some(Box::new(e)),
    })
}

fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| Duration::from_secs(secs).min(MAX_RETRY_AFTER))
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
