// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound chat event handling.
//!
//! Two event kinds matter:
//! - `app_mention`: the text, minus the bot's own mention, goes to the
//!   [`QueryRelay`](crate::relay::QueryRelay);
//! - `reaction_added` with the marker reaction: the reacted-to message is
//!   fetched and appended to the ingest buffer.
//!
//! [`EventIntake::dispatch`] is the only place handler errors are logged.
//! Nothing propagates past it.

use std::sync::Arc;

use lookout_config::LookoutConfig;
use lookout_core::traits::ChatAdapter;
use lookout_core::types::{ChatEvent, SourceRef};
use lookout_core::{LookoutError, Snippet};
use lookout_corpus::IngestBuffer;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use crate::relay::{QueryRelay, RelayError};

/// Errors from handling a single event.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("event is missing field `{0}`")]
    MissingField(&'static str),

    #[error("history lookup failed: {0}")]
    History(#[source] LookoutError),

    #[error("bot identity lookup failed: {0}")]
    Identity(#[source] LookoutError),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

/// What happened to one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeOutcome {
    /// A flagged message was appended; `depth` is the buffer size afterwards.
    Captured { depth: usize },
    /// A question was answered in chat.
    Answered,
    /// The event was not one Lookout acts on.
    Ignored,
    /// Handling failed and was logged.
    Failed,
}

/// Maps chat events to buffer writes or relay turns.
pub struct EventIntake {
    chat: Arc<dyn ChatAdapter>,
    buffer: Arc<IngestBuffer>,
    relay: Arc<QueryRelay>,
    marker_reaction: String,
    capture_note: bool,
    bot_user_id: OnceCell<String>,
}

impl EventIntake {
    pub fn new(
        config: &LookoutConfig,
        chat: Arc<dyn ChatAdapter>,
        buffer: Arc<IngestBuffer>,
        relay: Arc<QueryRelay>,
    ) -> Self {
        Self {
            chat,
            buffer,
            relay,
            marker_reaction: config.slack.marker_reaction.clone(),
            capture_note: config.corpus.capture_note,
            bot_user_id: OnceCell::new(),
        }
    }

    /// Handles one event, logging any failure.
    pub async fn dispatch(&self, event: ChatEvent) -> IntakeOutcome {
        let result = match event.event_type.as_str() {
            "app_mention" => self.handle_mention(&event.payload).await,
            "reaction_added" => self.handle_reaction(&event.payload).await,
            other => {
                debug!(event_type = other, "event ignored");
                Ok(IntakeOutcome::Ignored)
            }
        };

        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    event_type = %event.event_type,
                    event_id = event.event_id.as_deref().unwrap_or("-"),
                    error = %e,
                    "event handling failed"
                );
                IntakeOutcome::Failed
            }
        }
    }

    /// Relays a mention's question to the assistant.
    pub async fn handle_mention(&self, payload: &Value) -> Result<IntakeOutcome, IntakeError> {
        let user = str_field(payload, "user")?;
        let channel = str_field(payload, "channel")?;
        let text = str_field(payload, "text")?;

        let bot_id = self.bot_user_id().await?;
        let question = text.replace(&format!("<@{bot_id}>"), "");
        let question = question.trim();

        debug!(user, channel, question_len = question.len(), "mention received");
        self.relay.ask(user, channel, question).await?;
        Ok(IntakeOutcome::Answered)
    }

    /// Captures the reacted-to message when the reaction is the marker.
    pub async fn handle_reaction(&self, payload: &Value) -> Result<IntakeOutcome, IntakeError> {
        let reaction = str_field(payload, "reaction")?;
        if reaction != self.marker_reaction {
            debug!(reaction, "reaction ignored");
            return Ok(IntakeOutcome::Ignored);
        }

        let item = payload
            .get("item")
            .ok_or(IntakeError::MissingField("item"))?;
        let channel = item
            .get("channel")
            .and_then(Value::as_str)
            .ok_or(IntakeError::MissingField("item.channel"))?;
        let ts = item
            .get("ts")
            .and_then(Value::as_str)
            .ok_or(IntakeError::MissingField("item.ts"))?;

        let message = self
            .chat
            .fetch_message(channel, ts)
            .await
            .map_err(IntakeError::History)?;

        let text = if self.capture_note {
            capture_note(ts, &message.text)
        } else {
            message.text
        };

        let depth = self.buffer.append(Snippet::new(
            text,
            SourceRef {
                channel: channel.to_string(),
                ts: ts.to_string(),
            },
        ));
        info!(channel, ts, depth, "flagged message captured");
        Ok(IntakeOutcome::Captured { depth })
    }

    /// The bot's user id, looked up once and cached after the first success.
    async fn bot_user_id(&self) -> Result<&str, IntakeError> {
        self.bot_user_id
            .get_or_try_init(|| self.chat.bot_user_id())
            .await
            .map(String::as_str)
            .map_err(IntakeError::Identity)
    }
}

/// Prefixes captured text with the time it was flagged.
pub fn capture_note(ts: &str, text: &str) -> String {
    format!("The following was discovered at UTC {ts}: {text}")
}

fn str_field<'a>(payload: &'a Value, name: &'static str) -> Result<&'a str, IntakeError> {
    payload
        .get(name)
        .and_then(Value::as_str)
        .ok_or(IntakeError::MissingField(name))
}

#[cfg(test)]
mod tests {
    use lookout_test_utils::{MockAssistant, MockChat};
    use serde_json::json;
    use tracing_test::traced_test;

    use super::*;
    use crate::relay::ConversationThread;

    async fn intake() -> (EventIntake, Arc<MockChat>, Arc<MockAssistant>) {
        let chat = Arc::new(MockChat::new());
        let assistant = Arc::new(MockAssistant::new());
        let thread = ConversationThread::open(assistant.as_ref()).await.unwrap();
        let relay = Arc::new(QueryRelay::new(assistant.clone(), chat.clone(), thread));
        let intake = EventIntake::new(
            &LookoutConfig::default(),
            chat.clone(),
            Arc::new(IngestBuffer::new()),
            relay,
        );
        (intake, chat, assistant)
    }

    #[test]
    fn capture_note_format() {
        assert_eq!(
            capture_note("1712345678.000100", "rogue ssh key"),
            "The following was discovered at UTC 1712345678.000100: rogue ssh key"
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn malformed_mention_is_logged_and_next_one_still_handled() {
        let (intake, chat, assistant) = intake().await;
        assistant.push_answer(&["ok"]).await;

        let broken = ChatEvent::from_payload(
            Some("Ev1".into()),
            json!({"type": "app_mention", "channel": "C1", "text": "<@U0BOT> hi"}),
        );
        assert_eq!(intake.dispatch(broken).await, IntakeOutcome::Failed);
        assert!(logs_contain("event handling failed"));
        assert!(logs_contain("missing field `user`"));

        let good = ChatEvent::from_payload(
            Some("Ev2".into()),
            json!({"type": "app_mention", "user": "U1", "channel": "C1", "text": "<@U0BOT> hi"}),
        );
        assert_eq!(intake.dispatch(good).await, IntakeOutcome::Answered);
        assert_eq!(chat.posted().await.len(), 1);
    }
}
