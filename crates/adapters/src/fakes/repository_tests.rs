// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jobkit_core::{InteractionId, ThreadId};

fn row(id: &str) -> AttachmentRow {
    AttachmentRow {
        id: id.to_string(),
        thread_id: ThreadId::new(),
        interaction_id: InteractionId::new(),
        state: AttachmentState::PendingDownload,
        url: Some("https://example.test/a".into()),
        key: None,
        digest: None,
        unpadded_size: None,
        local_path: None,
        is_community_destination: false,
    }
}

#[tokio::test]
async fn update_state_persists() {
    let repo = FakeAttachmentRepository::new();
    repo.seed(row("a1"));
    repo.update_state("a1", AttachmentState::Downloaded).await.unwrap();
    assert_eq!(repo.state_of("a1"), Some(AttachmentState::Downloaded));
}

#[tokio::test]
async fn orphaned_returns_only_marked_rows() {
    let repo = FakeAttachmentRepository::new();
    repo.seed(row("a1"));
    repo.seed(row("a2"));
    repo.mark_orphaned("a2");

    let orphans = repo.orphaned().await.unwrap();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].id, "a2");
}

#[tokio::test]
async fn delete_missing_row_errors() {
    let repo = FakeAttachmentRepository::new();
    assert!(repo.delete("missing").await.is_err());
}
