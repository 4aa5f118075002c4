// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Lookout.
//!
//! Holds the adapter traits the corpus pipeline and the intake layer are
//! written against, the shared error type, and the domain types that cross
//! crate boundaries. Concrete Slack and OpenAI clients live in their own
//! crates and implement the traits defined here.

pub mod error;
pub mod traits;
pub mod types;

pub use error::LookoutError;
pub use types::{
    AdapterType, ChatEvent, ChatMessage, DocumentId, HealthStatus, IndexId, MessageRole,
    RunEvent, Snippet, SourceRef, ThreadId,
};

pub use traits::{AssistantAdapter, ChatAdapter, IndexAdapter, PluginAdapter, RunEventStream};
