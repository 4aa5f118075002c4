// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the corpus rebuild pipeline.

use std::sync::Arc;

use lookout_core::Snippet;
use lookout_core::types::{DocumentId, IndexId};
use lookout_corpus::{CorpusRebuilder, IngestBuffer, RebuildOutcome, RebuildStep};
use lookout_test_utils::{IndexCall, IndexOp, MockIndex, source};

fn setup() -> (CorpusRebuilder, Arc<MockIndex>) {
    let index = Arc::new(MockIndex::new());
    (CorpusRebuilder::new(index.clone(), "security_data"), index)
}

#[tokio::test]
async fn empty_snapshot_makes_no_calls() {
    let (rebuilder, index) = setup();
    let outcome = rebuilder.rebuild(&[]).await.unwrap();
    assert_eq!(outcome, RebuildOutcome::Skipped);
    assert!(index.calls().await.is_empty());
}

#[tokio::test]
async fn rebuild_calls_each_primitive_once_in_order() {
    let (rebuilder, index) = setup();
    let buffer = IngestBuffer::new();
    buffer.append(Snippet::new("a", source("C1", "1.0")));
    buffer.append(Snippet::new("b", source("C1", "2.0")));

    let outcome = rebuilder.rebuild(&buffer.snapshot()).await.unwrap();

    let calls = index.calls().await;
    assert_eq!(
        calls,
        vec![
            IndexCall::CreateIndex {
                name: "security_data".into()
            },
            IndexCall::UploadDocument {
                content: "b a".into()
            },
            IndexCall::AttachDocument {
                index: IndexId("vs_mock1".into()),
                document: DocumentId("file-mock2".into()),
            },
            IndexCall::UpdateRetrieval {
                index: IndexId("vs_mock1".into())
            },
        ]
    );
    assert_eq!(
        outcome,
        RebuildOutcome::Rebuilt {
            index: IndexId("vs_mock1".into()),
            snippets: 2,
            bytes: 3,
        }
    );
}

#[tokio::test]
async fn each_step_failure_aborts_the_rest() {
    let cases = [
        (IndexOp::CreateIndex, RebuildStep::CreateIndex, 1),
        (IndexOp::UploadDocument, RebuildStep::UploadDocument, 2),
        (IndexOp::AttachDocument, RebuildStep::AttachDocument, 3),
        (IndexOp::UpdateRetrieval, RebuildStep::UpdateRetrieval, 4),
    ];

    for (op, step, calls_made) in cases {
        let (rebuilder, index) = setup();
        index.fail_on(Some(op)).await;
        let buffer = IngestBuffer::new();
        buffer.append(Snippet::new("x", source("C1", "1.0")));

        let err = rebuilder.rebuild(&buffer.snapshot()).await.unwrap_err();
        assert_eq!(err.step, step);

        let ops = index.ops().await;
        assert_eq!(ops.len(), calls_made, "failure at {op:?}");
        assert_eq!(ops.last(), Some(&op));
    }
}

#[tokio::test]
async fn every_rebuild_creates_a_fresh_index() {
    let (rebuilder, index) = setup();
    let buffer = IngestBuffer::new();
    buffer.append(Snippet::new("a", source("C1", "1.0")));
    rebuilder.rebuild(&buffer.snapshot()).await.unwrap();
    buffer.append(Snippet::new("b", source("C1", "2.0")));
    rebuilder.rebuild(&buffer.snapshot()).await.unwrap();

    let retrieval_targets: Vec<IndexId> = index
        .calls()
        .await
        .into_iter()
        .filter_map(|c| match c {
            IndexCall::UpdateRetrieval { index } => Some(index),
            _ => None,
        })
        .collect();
    assert_eq!(retrieval_targets.len(), 2);
    assert_ne!(retrieval_targets[0], retrieval_targets[1]);
    assert_eq!(index.uploaded_documents().await, vec!["a", "b a"]);
}
