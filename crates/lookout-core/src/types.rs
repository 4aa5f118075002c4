// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared between the corpus pipeline, the intake layer and the adapters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Handle of a conversation thread on the provider side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadId(pub String);

/// Handle of one searchable index generation (a vector store).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexId(pub String);

/// Handle of an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// The role an adapter plays in the relay.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Chat,
    Assistant,
    Index,
}

/// Author role of a message appended to a conversation thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Where a snippet was captured from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Chat channel identifier.
    pub channel: String,
    /// Message timestamp, which doubles as the message identifier on Slack.
    pub ts: String,
}

/// One captured flagged-message text unit pending incorporation into the corpus.
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    text: String,
    captured_at: DateTime<Utc>,
    source: SourceRef,
}

impl Snippet {
    /// Creates a snippet stamped with the current time.
    pub fn new(text: impl Into<String>, source: SourceRef) -> Self {
        Self::captured_at(text, source, Utc::now())
    }

    /// Creates a snippet with an explicit capture time.
    pub fn captured_at(text: impl Into<String>, source: SourceRef, at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            captured_at: at,
            source,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn captured(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn source(&self) -> &SourceRef {
        &self.source
    }
}

/// A single message returned by the chat platform's history lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message body.
    pub text: String,
    /// Message timestamp.
    #[serde(default)]
    pub ts: String,
    /// Author, absent for bot and system messages.
    #[serde(default)]
    pub user: Option<String>,
}

/// An inbound chat event, already unwrapped from its delivery envelope.
///
/// The payload is kept as raw JSON; field extraction (and its failure modes)
/// belongs to the intake handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEvent {
    /// The event's `type` field (`app_mention`, `reaction_added`, ...).
    pub event_type: String,
    /// Delivery identifier assigned by the platform, if any.
    pub event_id: Option<String>,
    /// The inner event object.
    pub payload: serde_json::Value,
}

impl ChatEvent {
    /// Builds an event from the inner event object, reading `type` from it.
    pub fn from_payload(event_id: Option<String>, payload: serde_json::Value) -> Self {
        let event_type = payload
            .get("type")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        Self {
            event_type,
            event_id,
            payload,
        }
    }
}

/// One event from a streaming assistant run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// An assistant message finished; carries its text.
    MessageCompleted(String),
    /// The run failed on the provider side.
    RunFailed(String),
    /// Any other event, identified by its name. Ignored by the relay.
    Other(String),
}
