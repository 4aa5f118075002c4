// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Lookout integration tests.
//!
//! Provides mock adapters that record every external call, for fast,
//! deterministic tests without Slack or OpenAI.
//!
//! # Components
//!
//! - [`MockChat`] - chat platform with a seeded message history and captured posts
//! - [`MockAssistant`] - conversational provider with scripted run events
//! - [`MockIndex`] - indexing provider with an ordered call log and failure injection

pub mod mock_assistant;
pub mod mock_chat;
pub mod mock_index;

pub use mock_assistant::MockAssistant;
pub use mock_chat::MockChat;
pub use mock_index::{IndexCall, IndexOp, MockIndex};

use lookout_core::SourceRef;

/// Shorthand for a source reference in tests.
pub fn source(channel: &str, ts: &str) -> SourceRef {
    SourceRef {
        channel: channel.to_string(),
        ts: ts.to_string(),
    }
}
