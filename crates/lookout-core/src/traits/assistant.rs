// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversational provider adapter trait.

use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::error::LookoutError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{MessageRole, RunEvent, ThreadId};

/// Stream of events produced by one assistant run.
pub type RunEventStream = Pin<Box<dyn Stream<Item = Result<RunEvent, LookoutError>> + Send>>;

/// Thread-based conversational provider bound to one configured assistant.
#[async_trait]
pub trait AssistantAdapter: PluginAdapter {
    /// Creates a new, empty conversation thread.
    async fn create_thread(&self) -> Result<ThreadId, LookoutError>;

    /// Appends a message to `thread`.
    async fn append_message(
        &self,
        thread: &ThreadId,
        role: MessageRole,
        text: &str,
    ) -> Result<(), LookoutError>;

    /// Starts a retrieval-augmented run of the assistant on `thread` and
    /// streams its events.
    async fn run_stream(&self, thread: &ThreadId) -> Result<RunEventStream, LookoutError>;
}
