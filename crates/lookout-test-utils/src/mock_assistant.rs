// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock assistant adapter for deterministic testing.
//!
//! `MockAssistant` implements `AssistantAdapter` with scripted run events and
//! records every message appended to a thread.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use lookout_core::traits::{AssistantAdapter, PluginAdapter, RunEventStream};
use lookout_core::types::{AdapterType, HealthStatus, MessageRole, RunEvent, ThreadId};
use lookout_core::LookoutError;

/// A message captured by [`MockAssistant::append_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendedMessage {
    pub thread: ThreadId,
    pub role: MessageRole,
    pub text: String,
}

/// A mock conversational provider for testing.
///
/// Each call to `run_stream()` consumes the next script pushed with
/// [`push_run`](Self::push_run); with no script queued the run yields no events.
pub struct MockAssistant {
    scripts: Arc<Mutex<VecDeque<Vec<RunEvent>>>>,
    appended: Arc<Mutex<Vec<AppendedMessage>>>,
    threads_created: AtomicUsize,
    runs_started: AtomicUsize,
    fail_append: AtomicBool,
    fail_run: AtomicBool,
}

impl MockAssistant {
    pub fn new() -> Self {
        Self {
            scripts: Arc::new(Mutex::new(VecDeque::new())),
            appended: Arc::new(Mutex::new(Vec::new())),
            threads_created: AtomicUsize::new(0),
            runs_started: AtomicUsize::new(0),
            fail_append: AtomicBool::new(false),
            fail_run: AtomicBool::new(false),
        }
    }

    /// Queue the events the next run will stream.
    pub async fn push_run(&self, events: Vec<RunEvent>) {
        self.scripts.lock().await.push_back(events);
    }

    /// Queue a run whose only output is the given completed messages.
    pub async fn push_answer(&self, messages: &[&str]) {
        let events = messages
            .iter()
            .map(|m| RunEvent::MessageCompleted(m.to_string()))
            .collect();
        self.push_run(events).await;
    }

    /// Get all messages passed to `append_message()`.
    pub async fn appended(&self) -> Vec<AppendedMessage> {
        self.appended.lock().await.clone()
    }

    pub fn threads_created(&self) -> usize {
        self.threads_created.load(Ordering::SeqCst)
    }

    pub fn runs_started(&self) -> usize {
        self.runs_started.load(Ordering::SeqCst)
    }

    pub fn set_fail_append(&self, fail: bool) {
        self.fail_append.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_run(&self, fail: bool) {
        self.fail_run.store(fail, Ordering::SeqCst);
    }
}

impl Default for MockAssistant {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockAssistant {
    fn name(&self) -> &str {
        "mock-assistant"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Assistant
    }

    async fn health_check(&self) -> Result<HealthStatus, LookoutError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl AssistantAdapter for MockAssistant {
    async fn create_thread(&self) -> Result<ThreadId, LookoutError> {
        let n = self.threads_created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ThreadId(format!("thread_mock{n}")))
    }

    async fn append_message(
        &self,
        thread: &ThreadId,
        role: MessageRole,
        text: &str,
    ) -> Result<(), LookoutError> {
        if self.fail_append.load(Ordering::SeqCst) {
            return Err(LookoutError::provider("mock append failure"));
        }
        self.appended.lock().await.push(AppendedMessage {
            thread: thread.clone(),
            role,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn run_stream(&self, _thread: &ThreadId) -> Result<RunEventStream, LookoutError> {
        self.runs_started.fetch_add(1, Ordering::SeqCst);
        if self.fail_run.load(Ordering::SeqCst) {
            return Err(LookoutError::provider("mock run failure"));
        }
        let events = self.scripts.lock().await.pop_front().unwrap_or_default();
        Ok(Box::pin(futures::stream::iter(events.into_iter().map(Ok))))
    }
}
