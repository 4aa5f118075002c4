// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI adapter for Lookout.
//!
//! [`OpenAiAdapter`] implements both [`AssistantAdapter`] (threads, messages,
//! streaming runs) and [`IndexAdapter`] (vector stores, file upload, the
//! assistant's file-search configuration) for one configured assistant.

pub mod client;
pub mod sse;
pub mod types;

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use lookout_config::LookoutConfig;
use lookout_core::error::LookoutError;
use lookout_core::traits::{AssistantAdapter, IndexAdapter, PluginAdapter, RunEventStream};
use lookout_core::types::{AdapterType, DocumentId, HealthStatus, IndexId, MessageRole, ThreadId};
use tracing::{debug, info};

use crate::client::OpenAiClient;
use crate::types::{
    AttachFileRequest, CreateMessageRequest, CreateRunRequest, CreateVectorStoreRequest,
    ObjectRef, UpdateAssistantRequest, VectorStoreFile,
};

/// OpenAI adapter bound to a single assistant.
pub struct OpenAiAdapter {
    client: OpenAiClient,
    assistant_id: String,
}

impl OpenAiAdapter {
    /// Creates the adapter from `[openai]` configuration.
    ///
    /// Fails if `openai.api_key` or `openai.assistant_id` is unset.
    pub fn new(config: &LookoutConfig) -> Result<Self, LookoutError> {
        let api_key = config
            .openai
            .api_key
            .as_deref()
            .ok_or_else(|| LookoutError::Config("openai.api_key is required".to_string()))?;
        let assistant_id = config
            .openai
            .assistant_id
            .clone()
            .ok_or_else(|| LookoutError::Config("openai.assistant_id is required".to_string()))?;

        let client = OpenAiClient::new(
            api_key,
            &config.openai.api_base_url,
            Duration::from_secs(config.openai.request_timeout_secs),
        )?;

        info!(assistant = %assistant_id, "OpenAI adapter initialized");
        Ok(Self {
            client,
            assistant_id,
        })
    }

    pub fn assistant_id(&self) -> &str {
        &self.assistant_id
    }
}

/// Re-labels a provider failure as an index failure.
fn index_error(e: LookoutError) -> LookoutError {
    match e {
        LookoutError::Provider { message, source } => LookoutError::Index { message, source },
        other => other,
    }
}

#[async_trait]
impl PluginAdapter for OpenAiAdapter {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Assistant
    }

    /// Retrieves the configured assistant.
    async fn health_check(&self) -> Result<HealthStatus, LookoutError> {
        let path = format!("/assistants/{}", self.assistant_id);
        match self.client.get_json::<ObjectRef>(&path).await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl AssistantAdapter for OpenAiAdapter {
    async fn create_thread(&self) -> Result<ThreadId, LookoutError> {
        let thread: ObjectRef = self
            .client
            .post_json("/threads", &serde_json::json!({}))
            .await?;
        Ok(ThreadId(thread.id))
    }

    async fn append_message(
        &self,
        thread: &ThreadId,
        role: MessageRole,
        text: &str,
    ) -> Result<(), LookoutError> {
        let path = format!("/threads/{}/messages", thread.0);
        let message: ObjectRef = self
            .client
            .post_json(&path, &CreateMessageRequest { role, content: text })
            .await?;
        debug!(thread = %thread.0, message = %message.id, "message appended");
        Ok(())
    }

    async fn run_stream(&self, thread: &ThreadId) -> Result<RunEventStream, LookoutError> {
        let path = format!("/threads/{}/runs", thread.0);
        let request = CreateRunRequest {
            assistant_id: &self.assistant_id,
            stream: true,
        };
        self.client.post_stream(&path, &request).await
    }
}

#[async_trait]
impl IndexAdapter for OpenAiAdapter {
    async fn create_index(&self, name: &str) -> Result<IndexId, LookoutError> {
        let store: ObjectRef = self
            .client
            .post_json("/vector_stores", &CreateVectorStoreRequest { name })
            .await
            .map_err(index_error)?;
        debug!(vector_store = %store.id, "vector store created");
        Ok(IndexId(store.id))
    }

    async fn upload_document(&self, path: &Path) -> Result<DocumentId, LookoutError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| LookoutError::Index {
            message: format!("failed to read {}", path.display()),
            source: Some(Box::new(e)),
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("corpus.txt");

        let file: ObjectRef = self
            .client
            .upload_file(file_name, bytes)
            .await
            .map_err(index_error)?;
        debug!(file = %file.id, "document uploaded");
        Ok(DocumentId(file.id))
    }

    async fn attach_document(
        &self,
        index: &IndexId,
        document: &DocumentId,
    ) -> Result<(), LookoutError> {
        let path = format!("/vector_stores/{}/files", index.0);
        let attached: VectorStoreFile = self
            .client
            .post_json(&path, &AttachFileRequest { file_id: &document.0 })
            .await
            .map_err(index_error)?;
        debug!(
            vector_store = %index.0,
            file = %attached.id,
            status = attached.status.as_deref().unwrap_or("unknown"),
            "document attached"
        );
        Ok(())
    }

    async fn update_retrieval(&self, index: &IndexId) -> Result<(), LookoutError> {
        let path = format!("/assistants/{}", self.assistant_id);
        let _: ObjectRef = self
            .client
            .post_json(&path, &UpdateAssistantRequest::single_vector_store(&index.0))
            .await
            .map_err(index_error)?;
        Ok(())
    }
}
