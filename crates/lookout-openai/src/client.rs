// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI Assistants v2 and Vector Stores APIs.
//!
//! Provides [`OpenAiClient`] which handles request construction,
//! authentication, streaming run responses, multipart file upload, and
//! transient error retry.

use std::time::Duration;

use lookout_core::LookoutError;
use lookout_core::traits::RunEventStream;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::sse;
use crate::types::ApiErrorResponse;

/// Header selecting the Assistants API generation.
const BETA_HEADER: (&str, &str) = ("openai-beta", "assistants=v2");

/// HTTP client for OpenAI API communication.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl OpenAiClient {
    /// Creates a new client rooted at `base_url`, e.g. `https://api.openai.com/v1`.
    ///
    /// `timeout` bounds each whole request, including a streamed run body.
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, LookoutError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                LookoutError::Config(format!("invalid OpenAI API key header value: {e}"))
            })?,
        );
        headers.insert(BETA_HEADER.0, HeaderValue::from_static(BETA_HEADER.1));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| LookoutError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: 1,
        })
    }

    /// `GET {path}` decoded as `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, LookoutError> {
        let url = self.url(path);
        let response = self.send(|| self.client.get(&url)).await?;
        decode(response).await
    }

    /// `POST {path}` with a JSON body, decoded as `T`.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, LookoutError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let response = self.send(|| self.client.post(&url).json(body)).await?;
        decode(response).await
    }

    /// `POST {path}` with a JSON body, returning the SSE stream of the response.
    pub async fn post_stream<B>(&self, path: &str, body: &B) -> Result<RunEventStream, LookoutError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let response = self
            .send(|| {
                self.client
                    .post(&url)
                    .header(reqwest::header::ACCEPT, "text/event-stream")
                    .json(body)
            })
            .await?;
        Ok(sse::parse_run_stream(response))
    }

    /// `POST /files` as multipart with `purpose=assistants`.
    pub async fn upload_file<T: DeserializeOwned>(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<T, LookoutError> {
        let url = self.url("/files");
        let response = self
            .send(|| {
                let part =
                    reqwest::multipart::Part::bytes(bytes.clone()).file_name(file_name.to_string());
                let form = reqwest::multipart::Form::new()
                    .text("purpose", "assistants")
                    .part("file", part);
                self.client.post(&url).multipart(form)
            })
            .await?;
        decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a request built by `build`, retrying once on a transient status.
    ///
    /// Returns the response only when its status is a success.
    async fn send<F>(&self, build: F) -> Result<reqwest::Response, LookoutError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying OpenAI request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = build().send().await.map_err(|e| LookoutError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

            let status = response.status();
            debug!(status = %status, attempt, path = %response.url().path(), "OpenAI response received");

            if status.is_success() {
                return Ok(response);
            }

            let body = response.text().await.unwrap_or_default();

            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, "transient error, will retry");
                last_error = Some(LookoutError::provider(format!(
                    "API returned {status}: {body}"
                )));
                continue;
            }

            let error_msg = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "OpenAI API error ({}): {}",
                    api_err.error.type_.as_deref().unwrap_or("unknown"),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(LookoutError::provider(error_msg));
        }

        Err(last_error.unwrap_or_else(|| {
            LookoutError::provider("OpenAI request failed after retries")
        }))
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, LookoutError> {
    let body = response.text().await.map_err(|e| LookoutError::Provider {
        message: format!("failed to read response body: {e}"),
        source: Some(Box::new(e)),
    })?;
    serde_json::from_str(&body).map_err(|e| LookoutError::Provider {
        message: format!("failed to parse API response: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
