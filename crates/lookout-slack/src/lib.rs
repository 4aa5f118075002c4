// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slack chat adapter for Lookout.
//!
//! Implements [`ChatAdapter`] over three Web API methods: `chat.postMessage`,
//! `conversations.history` and `auth.test`. Inbound events arrive through the
//! gateway crate, not here.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use lookout_config::LookoutConfig;
use lookout_core::error::LookoutError;
use lookout_core::traits::{ChatAdapter, PluginAdapter};
use lookout_core::types::{AdapterType, ChatMessage, HealthStatus};
use tracing::info;

use crate::client::SlackClient;

/// Slack Web API adapter implementing [`ChatAdapter`].
pub struct SlackAdapter {
    client: SlackClient,
}

impl SlackAdapter {
    /// Creates the adapter from `[slack]` configuration.
    ///
    /// Fails if `slack.bot_token` is unset.
    pub fn new(config: &LookoutConfig) -> Result<Self, LookoutError> {
        let token = config
            .slack
            .bot_token
            .as_deref()
            .ok_or_else(|| LookoutError::Config("slack.bot_token is required".to_string()))?;

        let client = SlackClient::new(
            token,
            &config.slack.api_base_url,
            Duration::from_secs(config.slack.request_timeout_secs),
        )?;

        info!(base_url = %config.slack.api_base_url, "Slack adapter initialized");
        Ok(Self { client })
    }
}

#[async_trait]
impl PluginAdapter for SlackAdapter {
    fn name(&self) -> &str {
        "slack"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Chat
    }

    async fn health_check(&self) -> Result<HealthStatus, LookoutError> {
        match self.client.auth_test().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl ChatAdapter for SlackAdapter {
    async fn post_message(&self, channel: &str, text: &str) -> Result<String, LookoutError> {
        Ok(self.client.post_message(channel, text).await?.ts)
    }

    async fn fetch_message(&self, channel: &str, ts: &str) -> Result<ChatMessage, LookoutError> {
        self.client
            .message_at(channel, ts)
            .await?
            .messages
            .into_iter()
            .next()
            .ok_or_else(|| LookoutError::chat(format!("no message at {ts} in {channel}")))
    }

    async fn bot_user_id(&self) -> Result<String, LookoutError> {
        Ok(self.client.auth_test().await?.user_id)
    }
}
