// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by every Lookout adapter.

use thiserror::Error;

/// Boxed error source carried by adapter failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The error type returned by all adapter traits.
#[derive(Debug, Error)]
pub enum LookoutError {
    /// Configuration errors (missing credentials, invalid header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Chat platform errors (Web API failure, `ok: false` responses, bad payloads).
    #[error("chat error: {message}")]
    Chat {
        message: String,
        source: Option<BoxError>,
    },

    /// Conversational provider errors (thread, message and run calls).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<BoxError>,
    },

    /// Indexing provider errors (index creation, upload, attach, retrieval update).
    #[error("index error: {message}")]
    Index {
        message: String,
        source: Option<BoxError>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LookoutError {
    /// Chat error without an underlying source.
    pub fn chat(message: impl Into<String>) -> Self {
        Self::Chat {
            message: message.into(),
            source: None,
        }
    }

    /// Provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Index error without an underlying source.
    pub fn index(message: impl Into<String>) -> Self {
        Self::Index {
            message: message.into(),
            source: None,
        }
    }
}
