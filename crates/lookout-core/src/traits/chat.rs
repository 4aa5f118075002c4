// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat platform adapter trait (Slack Web API and friends).

use async_trait::async_trait;

use crate::error::LookoutError;
use crate::traits::adapter::PluginAdapter;
use crate::types::ChatMessage;

/// Outbound calls the relay makes against the chat platform.
#[async_trait]
pub trait ChatAdapter: PluginAdapter {
    /// Posts `text` to `channel`, returning the new message's timestamp.
    async fn post_message(&self, channel: &str, text: &str) -> Result<String, LookoutError>;

    /// Fetches exactly the message at `ts` in `channel`.
    ///
    /// Implemented as a history lookup with `oldest = ts`, inclusive, limit 1.
    async fn fetch_message(&self, channel: &str, ts: &str) -> Result<ChatMessage, LookoutError>;

    /// Returns the bot's own user identifier, used to strip self-mentions.
    async fn bot_user_id(&self) -> Result<String, LookoutError>;
}
