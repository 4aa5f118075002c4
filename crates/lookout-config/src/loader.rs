// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./lookout.toml` > `~/.config/lookout/lookout.toml` > `/etc/lookout/lookout.toml`
//! with environment variable overrides via the `LOOKOUT_` prefix and the plain
//! deployment variables (`SLACK_BOT_TOKEN`, `PORT`, ...).

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::LookoutConfig;

/// Plain environment variable names understood without the `LOOKOUT_` prefix.
pub const DEPLOYMENT_ENV_VARS: &[&str] = &[
    "SLACK_BOT_TOKEN",
    "SLACK_SIGNING_SECRET",
    "OPENAI_API_KEY",
    "ASSISTANT_ID",
    "PORT",
];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/lookout/lookout.toml` (system-wide)
/// 3. `~/.config/lookout/lookout.toml` (user XDG config)
/// 4. `./lookout.toml` (local directory)
/// 5. `LOOKOUT_*` environment variables
/// 6. Deployment environment variables
pub fn load_config() -> Result<LookoutConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<LookoutConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LookoutConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LookoutConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LookoutConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .merge(deployment_env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LookoutConfig::default()))
        .merge(Toml::file("/etc/lookout/lookout.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("lookout/lookout.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("lookout.toml"))
        .merge(env_provider())
        .merge(deployment_env_provider())
}

/// `LOOKOUT_<SECTION>_<KEY>` provider.
///
/// Uses `Env::map()` with explicit section prefixes rather than
/// `Env::split("_")`: `LOOKOUT_SLACK_BOT_TOKEN` must become `slack.bot_token`,
/// not `slack.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("LOOKOUT_").map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("slack_", "slack.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("corpus_", "corpus.", 1);
        mapped.into()
    })
}

/// Provider for the unprefixed names deployments conventionally set.
fn deployment_env_provider() -> Env {
    Env::raw().only(DEPLOYMENT_ENV_VARS).map(|key| {
        let mapped = match key.as_str().to_ascii_lowercase().as_str() {
            "slack_bot_token" => "slack.bot_token",
            "slack_signing_secret" => "slack.signing_secret",
            "openai_api_key" => "openai.api_key",
            "assistant_id" => "openai.assistant_id",
            "port" => "gateway.port",
            other => return other.to_string().into(),
        };
        mapped.into()
    })
}
