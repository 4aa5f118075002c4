// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Corpus document materialization.

use std::io::Write;
use std::sync::Arc;

use lookout_core::Snippet;
use tempfile::NamedTempFile;

/// Joins snippet texts with a single space, in snapshot (newest-first) order.
pub fn join_snippets(snapshot: &[Arc<Snippet>]) -> String {
    snapshot
        .iter()
        .map(|s| s.text())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes `document` to a fresh `.txt` temporary file.
///
/// The file is removed when the returned handle is dropped.
pub fn stage(document: &str) -> std::io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("lookout-corpus-")
        .suffix(".txt")
        .tempfile()?;
    file.write_all(document.as_bytes())?;
    file.flush()?;
    Ok(file)
}
