// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic flush of the ingest buffer into corpus rebuilds.
//!
//! On every wake the [`FlushScheduler`] takes one snapshot of the buffer and
//! applies, in order:
//! - **no-op**: nothing buffered, or nothing new since the last successful flush;
//! - **overload guard**: depth at or above `max_depth` suppresses the rebuild
//!   and warns, every tick, until depth drops;
//! - **flush**: rebuild from the snapshot and advance the flush cursor on success.
//!
//! A failed rebuild leaves the cursor alone so the next tick retries with
//! whatever the buffer holds by then.

use std::sync::Arc;
use std::time::Duration;

use lookout_config::model::CorpusConfig;
use lookout_core::types::IndexId;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::buffer::IngestBuffer;
use crate::rebuild::{CorpusRebuilder, RebuildOutcome, RebuildStep};

/// What a single scheduler wake did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The buffer was empty.
    Empty,
    /// The buffer size matched the last successful flush.
    Unchanged { size: usize },
    /// The buffer was at or above capacity; no rebuild was attempted.
    Overloaded { size: usize, max_depth: usize },
    /// A rebuild succeeded and the cursor moved to `size`.
    Flushed { size: usize, index: IndexId },
    /// A rebuild failed at `step`; the cursor did not move.
    Failed { size: usize, step: RebuildStep },
}

/// Single owner of the flush cursor and sole caller of the rebuild pipeline.
pub struct FlushScheduler {
    buffer: Arc<IngestBuffer>,
    rebuilder: CorpusRebuilder,
    max_depth: usize,
    interval: Duration,
    last_flush_size: usize,
}

impl FlushScheduler {
    pub fn new(config: &CorpusConfig, buffer: Arc<IngestBuffer>, rebuilder: CorpusRebuilder) -> Self {
        Self {
            buffer,
            rebuilder,
            max_depth: config.max_depth,
            interval: Duration::from_secs(config.flush_interval_secs),
            last_flush_size: 0,
        }
    }

    /// Buffer size at the last successful flush.
    pub fn last_flush_size(&self) -> usize {
        self.last_flush_size
    }

    /// Runs one scheduling decision and, if warranted, one rebuild.
    ///
    /// Taking `&mut self` keeps rebuilds strictly sequential.
    pub async fn tick(&mut self) -> TickOutcome {
        let snapshot = self.buffer.snapshot();
        let size = snapshot.len();

        if size == 0 {
            debug!("flush skipped: buffer empty");
            return TickOutcome::Empty;
        }

        if size == self.last_flush_size {
            debug!(size, "flush skipped: no new snippets since last flush");
            return TickOutcome::Unchanged { size };
        }

        if size >= self.max_depth {
            warn!(
                size,
                max_depth = self.max_depth,
                last_flush_size = self.last_flush_size,
                "max queue depth reached, corpus rebuild suppressed"
            );
            return TickOutcome::Overloaded {
                size,
                max_depth: self.max_depth,
            };
        }

        match self.rebuilder.rebuild(&snapshot).await {
            Ok(RebuildOutcome::Rebuilt { index, .. }) => {
                info!(
                    size,
                    previous = self.last_flush_size,
                    index = %index.0,
                    "buffer flushed into corpus"
                );
                self.last_flush_size = size;
                TickOutcome::Flushed { size, index }
            }
            // Unreachable with a non-empty snapshot.
            Ok(RebuildOutcome::Skipped) => TickOutcome::Empty,
            Err(e) => {
                error!(
                    size,
                    step = %e.step,
                    error = %e.source,
                    "corpus rebuild failed, will retry next interval"
                );
                TickOutcome::Failed { size, step: e.step }
            }
        }
    }

    /// Ticks every interval until `cancel` fires.
    ///
    /// An in-flight rebuild is abandoned on cancellation.
    pub async fn run(mut self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Skip the first immediate tick.
        interval.tick().await;

        info!(
            interval_secs = self.interval.as_secs(),
            max_depth = self.max_depth,
            "flush scheduler started"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    tokio::select! {
                        outcome = self.tick() => {
                            debug!(?outcome, "flush tick complete");
                        }
                        _ = cancel.cancelled() => {
                            warn!("shutdown during corpus rebuild, abandoning it");
                            break;
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    break;
                }
            }
        }

        info!("flush scheduler shutting down");
    }
}
