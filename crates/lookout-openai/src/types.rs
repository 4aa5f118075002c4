// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI Assistants v2 request and response types.

use lookout_core::types::MessageRole;
use serde::{Deserialize, Serialize};

/// Any object that only matters for its `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectRef {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateVectorStoreRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttachFileRequest<'a> {
    pub file_id: &'a str,
}

/// Response of attaching a file to a vector store.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorStoreFile {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMessageRequest<'a> {
    pub role: MessageRole,
    pub content: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRunRequest<'a> {
    pub assistant_id: &'a str,
    pub stream: bool,
}

/// Body of `POST /assistants/{id}` that swaps the file-search index.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateAssistantRequest {
    pub tool_resources: ToolResources,
}

impl UpdateAssistantRequest {
    /// Retrieval pointed at exactly one vector store.
    pub fn single_vector_store(id: &str) -> Self {
        Self {
            tool_resources: ToolResources {
                file_search: FileSearchResources {
                    vector_store_ids: vec![id.to_string()],
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResources {
    pub file_search: FileSearchResources,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSearchResources {
    pub vector_store_ids: Vec<String>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// `thread.message.completed` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SseMessage {
    #[serde(default)]
    pub content: Vec<SseContentPart>,
}

impl SseMessage {
    /// Value of the first text part, if the message has one.
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .iter()
            .find_map(|part| part.text.as_ref().map(|t| t.value.as_str()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SseContentPart {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub text: Option<SseText>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SseText {
    pub value: String,
}

/// `thread.run.failed` (and cancelled/expired) payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SseRun {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_error: Option<ApiError>,
}

/// `error` event payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SseError {
    #[serde(default)]
    pub message: Option<String>,
}
