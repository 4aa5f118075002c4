// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batching pipeline between flagged-message capture and the assistant corpus.
//!
//! - [`IngestBuffer`]: lock-free, newest-first collection of captured snippets
//! - [`FlushScheduler`]: periodic task applying the no-op and overload policies
//! - [`CorpusRebuilder`]: full rebuild of the searchable corpus from a snapshot

pub mod buffer;
pub mod document;
pub mod rebuild;
pub mod scheduler;

pub use buffer::{IngestBuffer, Snapshot};
pub use rebuild::{CorpusRebuilder, RebuildError, RebuildOutcome, RebuildStep};
pub use scheduler::{FlushScheduler, TickOutcome};
