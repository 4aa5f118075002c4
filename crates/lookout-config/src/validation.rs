// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-zero intervals and http(s) base URLs.

use crate::diagnostic::ConfigError;
use crate::model::LookoutConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &LookoutConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.corpus.max_depth == 0 {
        errors.push(ConfigError::Validation {
            message: "corpus.max_depth must be at least 1".to_string(),
        });
    }

    if config.corpus.flush_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "corpus.flush_interval_secs must be at least 1".to_string(),
        });
    }

    if config.slack.marker_reaction.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "slack.marker_reaction must not be empty".to_string(),
        });
    }

    if config.slack.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "slack.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.openai.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "openai.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.openai.vector_store_name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "openai.vector_store_name must not be empty".to_string(),
        });
    }

    for (key, url) in [
        ("slack.api_base_url", &config.slack.api_base_url),
        ("openai.api_base_url", &config.openai.api_base_url),
    ] {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be an http(s) URL, got `{url}`"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks the credentials the `serve` command cannot run without.
///
/// Kept separate from [`validate_config`] so `lookout config` can print an
/// incomplete configuration.
pub fn require_credentials(config: &LookoutConfig) -> Result<(), Vec<ConfigError>> {
    let required = [
        ("slack.bot_token", config.slack.bot_token.as_deref()),
        ("slack.signing_secret", config.slack.signing_secret.as_deref()),
        ("openai.api_key", config.openai.api_key.as_deref()),
        ("openai.assistant_id", config.openai.assistant_id.as_deref()),
    ];

    let errors: Vec<ConfigError> = required
        .into_iter()
        .filter(|(_, value)| value.is_none_or(|v| v.trim().is_empty()))
        .map(|(key, _)| ConfigError::MissingKey {
            key: key.to_string(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
