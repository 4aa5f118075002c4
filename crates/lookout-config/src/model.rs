// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Lookout.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder printed in place of secret values.
pub const REDACTED: &str = "[REDACTED]";

/// Top-level Lookout configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LookoutConfig {
    /// Process identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Slack Web API and Events API settings.
    #[serde(default)]
    pub slack: SlackConfig,

    /// OpenAI assistant and vector store settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Webhook listener settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Buffer and flush scheduling settings.
    #[serde(default)]
    pub corpus: CorpusConfig,
}

impl LookoutConfig {
    /// Returns a copy with every secret replaced by [`REDACTED`].
    ///
    /// Unset secrets stay unset so the output still shows what is missing.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        let mask = |v: &mut Option<String>| {
            if v.is_some() {
                *v = Some(REDACTED.to_string());
            }
        };
        mask(&mut copy.slack.bot_token);
        mask(&mut copy.slack.signing_secret);
        mask(&mut copy.openai.api_key);
        copy
    }
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name used in logs.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "lookout".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Slack configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SlackConfig {
    /// Bot user OAuth token (`xoxb-...`).
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Signing secret used to verify Events API requests.
    #[serde(default)]
    pub signing_secret: Option<String>,

    /// Web API base URL.
    #[serde(default = "default_slack_api_base_url")]
    pub api_base_url: String,

    /// Reaction name that flags a message for capture.
    #[serde(default = "default_marker_reaction")]
    pub marker_reaction: String,

    /// Per-request timeout for Web API calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            signing_secret: None,
            api_base_url: default_slack_api_base_url(),
            marker_reaction: default_marker_reaction(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackConfig")
            .field("bot_token", &self.bot_token.as_ref().map(|_| REDACTED))
            .field(
                "signing_secret",
                &self.signing_secret.as_ref().map(|_| REDACTED),
            )
            .field("api_base_url", &self.api_base_url)
            .field("marker_reaction", &self.marker_reaction)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn default_slack_api_base_url() -> String {
    "https://slack.com/api".to_string()
}

fn default_marker_reaction() -> String {
    "eyes".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

/// OpenAI configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Identifier of the pre-configured assistant (`asst_...`).
    #[serde(default)]
    pub assistant_id: Option<String>,

    /// REST API base URL.
    #[serde(default = "default_openai_api_base_url")]
    pub api_base_url: String,

    /// Name given to each new vector store generation.
    #[serde(default = "default_vector_store_name")]
    pub vector_store_name: String,

    /// Per-request timeout. Streaming runs are bounded by the same value.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            assistant_id: None,
            api_base_url: default_openai_api_base_url(),
            vector_store_name: default_vector_store_name(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .field("assistant_id", &self.assistant_id)
            .field("api_base_url", &self.api_base_url)
            .field("vector_store_name", &self.vector_store_name)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn default_openai_api_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_vector_store_name() -> String {
    "security_data".to_string()
}

/// Webhook listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind to.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

fn default_gateway_host() -> String {
    "0.0.0.0".to_string()
}

fn default_gateway_port() -> u16 {
    3000
}

/// Buffer and flush scheduling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CorpusConfig {
    /// Seconds between flush scheduler wakeups.
    #[serde(default = "default_flush_interval_secs")]
    pub flush_interval_secs: u64,

    /// Buffer depth at which rebuilds are suppressed.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Prefix captured text with a "discovered at" note.
    #[serde(default = "default_capture_note")]
    pub capture_note: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            flush_interval_secs: default_flush_interval_secs(),
            max_depth: default_max_depth(),
            capture_note: default_capture_note(),
        }
    }
}

fn default_flush_interval_secs() -> u64 {
    10
}

fn default_max_depth() -> usize {
    500
}

fn default_capture_note() -> bool {
    true
}
