// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Indexing provider adapter trait.

use std::path::Path;

use async_trait::async_trait;

use crate::error::LookoutError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{DocumentId, IndexId};

/// Search index primitives plus the assistant retrieval switch.
///
/// The corpus rebuild calls these in order: create, upload, attach, update.
#[async_trait]
pub trait IndexAdapter: PluginAdapter {
    /// Creates a new, empty index generation.
    async fn create_index(&self, name: &str) -> Result<IndexId, LookoutError>;

    /// Uploads the file at `path` as a retrievable document.
    async fn upload_document(&self, path: &Path) -> Result<DocumentId, LookoutError>;

    /// Adds an uploaded document to an index.
    async fn attach_document(
        &self,
        index: &IndexId,
        document: &DocumentId,
    ) -> Result<(), LookoutError>;

    /// Points the assistant's retrieval configuration at `index` only,
    /// replacing any previous reference.
    async fn update_retrieval(&self, index: &IndexId) -> Result<(), LookoutError>;
}
