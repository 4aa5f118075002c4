// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slack Web API request and response bodies.

use lookout_core::types::ChatMessage;
use serde::{Deserialize, Serialize};

/// Fields every Web API response carries.
///
/// Slack answers most failures with HTTP 200 and `ok: false`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiStatus {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// `auth.test` response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTestResponse {
    pub user_id: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

/// `chat.postMessage` request.
#[derive(Debug, Clone, Serialize)]
pub struct PostMessageRequest<'a> {
    pub channel: &'a str,
    pub text: &'a str,
}

/// `chat.postMessage` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageResponse {
    pub ts: String,
}

/// `conversations.history` response.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}
