// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock indexing adapter for deterministic testing.
//!
//! `MockIndex` implements `IndexAdapter` and keeps an ordered log of every
//! call, including the content of each uploaded document.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use lookout_core::traits::{IndexAdapter, PluginAdapter};
use lookout_core::types::{AdapterType, DocumentId, HealthStatus, IndexId};
use lookout_core::LookoutError;

/// Which indexing primitive a call hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOp {
    CreateIndex,
    UploadDocument,
    AttachDocument,
    UpdateRetrieval,
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexCall {
    CreateIndex { name: String },
    UploadDocument { content: String },
    AttachDocument { index: IndexId, document: DocumentId },
    UpdateRetrieval { index: IndexId },
}

impl IndexCall {
    pub fn op(&self) -> IndexOp {
        match self {
            Self::CreateIndex { .. } => IndexOp::CreateIndex,
            Self::UploadDocument { .. } => IndexOp::UploadDocument,
            Self::AttachDocument { .. } => IndexOp::AttachDocument,
            Self::UpdateRetrieval { .. } => IndexOp::UpdateRetrieval,
        }
    }
}

/// A mock indexing provider for testing.
///
/// Failed calls are still recorded, so a log ending in the failing op shows
/// where a rebuild stopped.
pub struct MockIndex {
    calls: Arc<Mutex<Vec<IndexCall>>>,
    fail_on: Arc<Mutex<Option<IndexOp>>>,
    counter: AtomicUsize,
}

impl MockIndex {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on: Arc::new(Mutex::new(None)),
            counter: AtomicUsize::new(0),
        }
    }

    /// Every call made so far, in order.
    pub async fn calls(&self) -> Vec<IndexCall> {
        self.calls.lock().await.clone()
    }

    /// The op of every call made so far, in order.
    pub async fn ops(&self) -> Vec<IndexOp> {
        self.calls.lock().await.iter().map(IndexCall::op).collect()
    }

    /// Contents of every uploaded document, in order.
    pub async fn uploaded_documents(&self) -> Vec<String> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|c| match c {
                IndexCall::UploadDocument { content } => Some(content.clone()),
                _ => None,
            })
            .collect()
    }

    /// Make every call to `op` fail until cleared with `None`.
    pub async fn fail_on(&self, op: Option<IndexOp>) {
        *self.fail_on.lock().await = op;
    }

    async fn record(&self, call: IndexCall) -> Result<usize, LookoutError> {
        let op = call.op();
        self.calls.lock().await.push(call);
        if *self.fail_on.lock().await == Some(op) {
            return Err(LookoutError::index(format!("mock failure at {op:?}")));
        }
        Ok(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

impl Default for MockIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockIndex {
    fn name(&self) -> &str {
        "mock-index"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Index
    }

    async fn health_check(&self) -> Result<HealthStatus, LookoutError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl IndexAdapter for MockIndex {
    async fn create_index(&self, name: &str) -> Result<IndexId, LookoutError> {
        let n = self
            .record(IndexCall::CreateIndex {
                name: name.to_string(),
            })
            .await?;
        Ok(IndexId(format!("vs_mock{n}")))
    }

    async fn upload_document(&self, path: &Path) -> Result<DocumentId, LookoutError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| LookoutError::Index {
                message: format!("cannot read {}", path.display()),
                source: Some(Box::new(e)),
            })?;
        let n = self.record(IndexCall::UploadDocument { content }).await?;
        Ok(DocumentId(format!("file-mock{n}")))
    }

    async fn attach_document(
        &self,
        index: &IndexId,
        document: &DocumentId,
    ) -> Result<(), LookoutError> {
        self.record(IndexCall::AttachDocument {
            index: index.clone(),
            document: document.clone(),
        })
        .await?;
        Ok(())
    }

    async fn update_retrieval(&self, index: &IndexId) -> Result<(), LookoutError> {
        self.record(IndexCall::UpdateRetrieval {
            index: index.clone(),
        })
        .await?;
        Ok(())
    }
}
