// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Question/answer relay between chat mentions and the assistant.
//!
//! Every user shares one [`ConversationThread`], created at startup and kept
//! for the life of the process. The provider refuses a second run on a thread
//! while one is active, so turns are serialized: a question is appended and
//! answered before the next one is appended.

use std::sync::Arc;

use futures::StreamExt;
use lookout_core::traits::{AssistantAdapter, ChatAdapter};
use lookout_core::types::{MessageRole, RunEvent, ThreadId};
use lookout_core::LookoutError;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Errors from a single relay turn.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to append question to thread: {0}")]
    Append(#[source] LookoutError),

    #[error("failed to start assistant run: {0}")]
    Run(#[source] LookoutError),

    #[error("assistant run stream broke: {0}")]
    Stream(#[source] LookoutError),

    #[error("assistant run failed: {0}")]
    RunFailed(String),

    #[error("failed to post answer: {0}")]
    Post(#[source] LookoutError),
}

/// The process-wide conversation thread.
pub struct ConversationThread {
    id: ThreadId,
    turn: Mutex<()>,
}

impl ConversationThread {
    /// Creates the thread on the provider side.
    pub async fn open(assistant: &dyn AssistantAdapter) -> Result<Self, LookoutError> {
        let id = assistant.create_thread().await?;
        info!(thread = %id.0, "conversation thread created");
        Ok(Self::from_id(id))
    }

    /// Wraps an already existing thread.
    pub fn from_id(id: ThreadId) -> Self {
        Self {
            id,
            turn: Mutex::new(()),
        }
    }

    pub fn id(&self) -> &ThreadId {
        &self.id
    }
}

/// Forwards questions to the assistant and posts answers back to chat.
pub struct QueryRelay {
    assistant: Arc<dyn AssistantAdapter>,
    chat: Arc<dyn ChatAdapter>,
    thread: ConversationThread,
}

impl QueryRelay {
    pub fn new(
        assistant: Arc<dyn AssistantAdapter>,
        chat: Arc<dyn ChatAdapter>,
        thread: ConversationThread,
    ) -> Self {
        Self {
            assistant,
            chat,
            thread,
        }
    }

    pub fn thread_id(&self) -> &ThreadId {
        self.thread.id()
    }

    /// Answers `question` on behalf of `user` and posts the reply to `channel`.
    ///
    /// The reply is `<@user>: <answer>`, where the answer is every completed
    /// assistant message of the run joined with newlines. Returns the posted text.
    pub async fn ask(&self, user: &str, channel: &str, question: &str) -> Result<String, RelayError> {
        let answer = self.answer(question).await?;
        let reply = format!("<@{user}>: {answer}");
        self.chat
            .post_message(channel, &reply)
            .await
            .map_err(RelayError::Post)?;
        info!(
            user,
            channel,
            answer_len = answer.len(),
            "answer relayed"
        );
        Ok(reply)
    }

    /// Runs one turn on the shared thread and collects the completed messages.
    async fn answer(&self, question: &str) -> Result<String, RelayError> {
        let _turn = self.thread.turn.lock().await;

        self.assistant
            .append_message(self.thread.id(), MessageRole::User, question)
            .await
            .map_err(RelayError::Append)?;

        let mut events = self
            .assistant
            .run_stream(self.thread.id())
            .await
            .map_err(RelayError::Run)?;

        let mut parts = Vec::new();
        while let Some(event) = events.next().await {
            match event.map_err(RelayError::Stream)? {
                RunEvent::MessageCompleted(text) => parts.push(text),
                RunEvent::RunFailed(reason) => return Err(RelayError::RunFailed(reason)),
                RunEvent::Other(name) => debug!(run_event = %name, "run event ignored"),
            }
        }

        Ok(parts.join("\n"))
    }
}
