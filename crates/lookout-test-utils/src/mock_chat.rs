// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat adapter for deterministic testing.
//!
//! `MockChat` implements `ChatAdapter` over an in-memory message history and
//! captures every posted message for assertion in tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use lookout_core::traits::{ChatAdapter, PluginAdapter};
use lookout_core::types::{AdapterType, ChatMessage, HealthStatus};
use lookout_core::LookoutError;

/// A message captured by [`MockChat::post_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub channel: String,
    pub text: String,
}

/// A mock chat platform for testing.
pub struct MockChat {
    bot_id: String,
    history: Arc<Mutex<HashMap<(String, String), String>>>,
    posted: Arc<Mutex<Vec<PostedMessage>>>,
    fetch_calls: AtomicUsize,
    identity_calls: AtomicUsize,
    fail_fetch: AtomicBool,
    fail_post: AtomicBool,
    fail_identity: AtomicBool,
}

impl MockChat {
    /// Create a mock whose bot user id is `U0BOT`.
    pub fn new() -> Self {
        Self::with_bot_id("U0BOT")
    }

    /// Create a mock with a specific bot user id.
    pub fn with_bot_id(bot_id: &str) -> Self {
        Self {
            bot_id: bot_id.to_string(),
            history: Arc::new(Mutex::new(HashMap::new())),
            posted: Arc::new(Mutex::new(Vec::new())),
            fetch_calls: AtomicUsize::new(0),
            identity_calls: AtomicUsize::new(0),
            fail_fetch: AtomicBool::new(false),
            fail_post: AtomicBool::new(false),
            fail_identity: AtomicBool::new(false),
        }
    }

    /// Seed the history so `fetch_message(channel, ts)` returns `text`.
    pub async fn seed_message(&self, channel: &str, ts: &str, text: &str) {
        self.history
            .lock()
            .await
            .insert((channel.to_string(), ts.to_string()), text.to_string());
    }

    /// Get all messages passed to `post_message()`.
    pub async fn posted(&self) -> Vec<PostedMessage> {
        self.posted.lock().await.clone()
    }

    /// Number of history lookups performed.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of identity lookups performed.
    pub fn identity_calls(&self) -> usize {
        self.identity_calls.load(Ordering::SeqCst)
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_post(&self, fail: bool) {
        self.fail_post.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_identity(&self, fail: bool) {
        self.fail_identity.store(fail, Ordering::SeqCst);
    }
}

impl Default for MockChat {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockChat {
    fn name(&self) -> &str {
        "mock-chat"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Chat
    }

    async fn health_check(&self) -> Result<HealthStatus, LookoutError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ChatAdapter for MockChat {
    async fn post_message(&self, channel: &str, text: &str) -> Result<String, LookoutError> {
        if self.fail_post.load(Ordering::SeqCst) {
            return Err(LookoutError::chat("mock post failure"));
        }
        let mut posted = self.posted.lock().await;
        posted.push(PostedMessage {
            channel: channel.to_string(),
            text: text.to_string(),
        });
        Ok(format!("{}.000100", posted.len()))
    }

    async fn fetch_message(&self, channel: &str, ts: &str) -> Result<ChatMessage, LookoutError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(LookoutError::chat("mock history failure"));
        }
        let history = self.history.lock().await;
        let text = history
            .get(&(channel.to_string(), ts.to_string()))
            .ok_or_else(|| LookoutError::chat(format!("no message at {channel}/{ts}")))?;
        Ok(ChatMessage {
            text: text.clone(),
            ts: ts.to_string(),
            user: Some("U0AUTHOR".to_string()),
        })
    }

    async fn bot_user_id(&self) -> Result<String, LookoutError> {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_identity.load(Ordering::SeqCst) {
            return Err(LookoutError::chat("invalid_auth"));
        }
        Ok(self.bot_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_returns_seeded_message() {
        let chat = MockChat::new();
        chat.seed_message("C1", "1.0", "hello").await;

        let msg = chat.fetch_message("C1", "1.0").await.unwrap();
        assert_eq!(msg.text, "hello");
        assert_eq!(chat.fetch_calls(), 1);
        assert!(chat.fetch_message("C1", "2.0").await.is_err());
    }

    #[tokio::test]
    async fn post_captures_messages_in_order() {
        let chat = MockChat::new();
        chat.post_message("C1", "first").await.unwrap();
        chat.post_message("C2", "second").await.unwrap();

        let posted = chat.posted().await;
        assert_eq!(posted.len(), 2);
        assert_eq!(posted[0].text, "first");
        assert_eq!(posted[1].channel, "C2");
    }

    #[tokio::test]
    async fn failures_are_injectable() {
        let chat = MockChat::new();
        chat.set_fail_post(true);
        chat.set_fail_identity(true);
        assert!(chat.post_message("C1", "x").await.is_err());
        assert!(chat.bot_user_id().await.is_err());
        assert!(chat.posted().await.is_empty());
    }
}
