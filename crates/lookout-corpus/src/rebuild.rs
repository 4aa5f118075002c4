// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Corpus rebuild pipeline.
//!
//! Each rebuild materializes a snapshot as one document, registers it in a
//! brand new index generation, and points the assistant's retrieval at that
//! generation alone. Earlier generations are left in place.

use std::sync::Arc;
use std::time::Instant;

use lookout_core::traits::IndexAdapter;
use lookout_core::types::IndexId;
use lookout_core::{LookoutError, Snippet};
use strum::Display;
use thiserror::Error;
use tracing::{debug, info};

use crate::document;

/// The external step a rebuild was executing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RebuildStep {
    StageDocument,
    CreateIndex,
    UploadDocument,
    AttachDocument,
    UpdateRetrieval,
}

/// A rebuild that aborted part way through.
///
/// A failure at [`RebuildStep::UpdateRetrieval`] leaves an orphaned index.
#[derive(Debug, Error)]
#[error("corpus rebuild failed at {step}: {source}")]
pub struct RebuildError {
    pub step: RebuildStep,
    #[source]
    pub source: LookoutError,
}

impl RebuildError {
    fn at(step: RebuildStep) -> impl FnOnce(LookoutError) -> Self {
        move |source| Self { step, source }
    }
}

/// Result of a rebuild that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildOutcome {
    /// Nothing to rebuild; no external calls were made.
    Skipped,
    /// A new index generation is live.
    Rebuilt {
        index: IndexId,
        snippets: usize,
        bytes: usize,
    },
}

/// Drives the indexing provider through one full corpus rebuild.
pub struct CorpusRebuilder {
    index: Arc<dyn IndexAdapter>,
    index_name: String,
}

impl CorpusRebuilder {
    /// `index_name` is given to every new index generation.
    pub fn new(index: Arc<dyn IndexAdapter>, index_name: impl Into<String>) -> Self {
        Self {
            index,
            index_name: index_name.into(),
        }
    }

    /// Rebuilds the corpus from `snapshot`.
    ///
    /// Steps run strictly in order; the first failure aborts the rest.
    pub async fn rebuild(&self, snapshot: &[Arc<Snippet>]) -> Result<RebuildOutcome, RebuildError> {
        if snapshot.is_empty() {
            return Ok(RebuildOutcome::Skipped);
        }

        let started = Instant::now();
        let body = document::join_snippets(snapshot);
        let staged = document::stage(&body).map_err(|e| RebuildError {
            step: RebuildStep::StageDocument,
            source: LookoutError::Index {
                message: "failed to stage corpus document".to_string(),
                source: Some(Box::new(e)),
            },
        })?;
        debug!(
            snippets = snapshot.len(),
            bytes = body.len(),
            path = %staged.path().display(),
            "corpus document staged"
        );

        let index = self
            .index
            .create_index(&self.index_name)
            .await
            .map_err(RebuildError::at(RebuildStep::CreateIndex))?;

        let document = self
            .index
            .upload_document(staged.path())
            .await
            .map_err(RebuildError::at(RebuildStep::UploadDocument))?;

        self.index
            .attach_document(&index, &document)
            .await
            .map_err(RebuildError::at(RebuildStep::AttachDocument))?;

        self.index
            .update_retrieval(&index)
            .await
            .map_err(RebuildError::at(RebuildStep::UpdateRetrieval))?;

        info!(
            index = %index.0,
            document = %document.0,
            snippets = snapshot.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "corpus rebuilt"
        );

        Ok(RebuildOutcome::Rebuilt {
            index,
            snippets: snapshot.len(),
            bytes: body.len(),
        })
    }
}
