// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lock-free ingest buffer for captured snippets.
//!
//! The buffer is a copy-on-write vector behind an [`ArcSwap`]: appends publish
//! a new generation, readers take an `Arc` of whichever generation is current
//! and iterate it without ever blocking a writer. Capacity is not checked here;
//! the flush scheduler enforces `max_depth` on the snapshots it takes.

use std::sync::Arc;

use arc_swap::ArcSwap;
use lookout_core::Snippet;

/// An immutable, newest-first view of the buffer at one point in time.
pub type Snapshot = Arc<Vec<Arc<Snippet>>>;

/// Process-lifetime collection of snippets pending incorporation into the corpus.
pub struct IngestBuffer {
    entries: ArcSwap<Vec<Arc<Snippet>>>,
}

impl IngestBuffer {
    pub fn new() -> Self {
        Self {
            entries: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Adds a snippet at the front of the buffer and returns the new depth.
    ///
    /// Never refuses a write. Concurrent appends are all retained.
    pub fn append(&self, snippet: Snippet) -> usize {
        let snippet = Arc::new(snippet);
        let previous = self.entries.rcu(|current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.push(Arc::clone(&snippet));
            next.extend(current.iter().cloned());
            next
        });
        previous.len() + 1
    }

    /// Current number of buffered snippets.
    pub fn size(&self) -> usize {
        self.entries.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns the current generation, newest snippet first.
    ///
    /// Later appends never show up in a snapshot already taken.
    pub fn snapshot(&self) -> Snapshot {
        self.entries.load_full()
    }
}

impl Default for IngestBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use lookout_core::SourceRef;

    use super::*;

    fn snippet(text: &str) -> Snippet {
        Snippet::new(
            text,
            SourceRef {
                channel: "C1".into(),
                ts: "1.0".into(),
            },
        )
    }

    #[test]
    fn append_places_newest_first() {
        let buffer = IngestBuffer::new();
        assert!(buffer.is_empty());

        assert_eq!(buffer.append(snippet("a")), 1);
        assert_eq!(buffer.append(snippet("b")), 2);

        let snapshot = buffer.snapshot();
        let texts: Vec<&str> = snapshot.iter().map(|s| s.text()).collect();
        assert_eq!(texts, vec!["b", "a"]);
        assert_eq!(buffer.size(), 2);
    }

    #[test]
    fn snapshot_is_unaffected_by_later_appends() {
        let buffer = IngestBuffer::new();
        buffer.append(snippet("a"));
        let before = buffer.snapshot();

        buffer.append(snippet("b"));
        assert_eq!(before.len(), 1);
        assert_eq!(buffer.snapshot().len(), 2);
    }

    #[test]
    fn concurrent_appends_are_all_retained() {
        let buffer = IngestBuffer::new();
        std::thread::scope(|scope| {
            for t in 0..8 {
                let buffer = &buffer;
                scope.spawn(move || {
                    for i in 0..50 {
                        buffer.append(snippet(&format!("t{t}-{i}")));
                        let _ = buffer.snapshot().len();
                    }
                });
            }
        });
        assert_eq!(buffer.size(), 400);
    }
}
