// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::context::test_support::FakeHarness;
use jobkit_adapters::{AttachmentRow, AttachmentState, NetworkError, UploadResponse};
use jobkit_core::{InteractionId, Job, JobDetails, ThreadId, Variant};

fn details(attachment_id: &str) -> JobDetails {
    JobDetails::new(serde_json::to_vec(&Details { attachment_id: attachment_id.into() }).unwrap())
}

fn seeded_job(harness: &FakeHarness, attachment_id: &str, row: AttachmentRow, interaction_id: InteractionId) -> Job {
    harness.attachments.seed(row);
    harness.interactions.seed_existing(interaction_id);
    Job::builder(Variant::AttachmentUpload)
        .thread_id(ThreadId::new())
        .interaction_id(interaction_id)
        .details(details(attachment_id))
        .build()
}

#[tokio::test]
async fn uploads_and_moves_blob_to_final_path() {
    let harness = FakeHarness::new();
    let interaction_id = InteractionId::new();
    let row = AttachmentRow {
        id: "att-1".into(),
        thread_id: ThreadId::new(),
        interaction_id,
        state: AttachmentState::Downloaded,
        url: None,
        key: Some(vec![7, 7]),
        digest: None,
        unpadded_size: None,
        local_path: Some("attachments/att-1".into()),
        is_community_destination: false,
    };
    harness.file_system.seed("attachments/att-1", vec![1, 2, 3]);
    let job = seeded_job(&harness, "att-1", row, interaction_id);
    harness.network.push_upload(Ok(UploadResponse { id: "hash-1".into(), url: "https://example.invalid/hash-1".into() }));

    let outcome = execute(&job, &harness.ctx, &CancellationToken::new()).await.unwrap();
    assert_eq!(outcome, Outcome::success(false));
    assert_eq!(harness.attachments.state_of("att-1"), Some(AttachmentState::Uploaded));
    assert_eq!(harness.attachments.local_path_of("att-1"), Some("attachments/hash-1".into()));
    assert!(harness.file_system.exists_in_test(std::path::Path::new("attachments/hash-1")));
    let events = harness.event_sink.events();
    assert_eq!(events.len(), 2);
}

#[tokio::test]
async fn community_destination_skips_encryption() {
    let harness = FakeHarness::new();
    let interaction_id = InteractionId::new();
    let row = AttachmentRow {
        id: "att-2".into(),
        thread_id: ThreadId::new(),
        interaction_id,
        state: AttachmentState::Downloaded,
        url: None,
        key: None,
        digest: None,
        unpadded_size: None,
        local_path: Some("attachments/att-2".into()),
        is_community_destination: true,
    };
    harness.file_system.seed("attachments/att-2", vec![9]);
    let job = seeded_job(&harness, "att-2", row, interaction_id);
    harness.network.push_upload(Ok(UploadResponse { id: "hash-2".into(), url: "https://example.invalid/hash-2".into() }));

    let outcome = execute(&job, &harness.ctx, &CancellationToken::new()).await.unwrap();
    assert_eq!(outcome, Outcome::success(false));
}

#[tokio::test]
async fn still_downloading_attachment_defers() {
    let harness = FakeHarness::new();
    let interaction_id = InteractionId::new();
    let row = AttachmentRow {
        id: "att-3".into(),
        thread_id: ThreadId::new(),
        interaction_id,
        state: AttachmentState::Downloading,
        url: None,
        key: None,
        digest: None,
        unpadded_size: None,
        local_path: None,
        is_community_destination: false,
    };
    let job = seeded_job(&harness, "att-3", row, interaction_id);

    let outcome = execute(&job, &harness.ctx, &CancellationToken::new()).await.unwrap();
    assert!(matches!(outcome, Outcome::Deferred { .. }));
}

#[tokio::test]
async fn missing_interaction_is_permanent() {
    let harness = FakeHarness::new();
    let row = AttachmentRow {
        id: "att-4".into(),
        thread_id: ThreadId::new(),
        interaction_id: InteractionId::new(),
        state: AttachmentState::Downloaded,
        url: None,
        key: None,
        digest: None,
        unpadded_size: None,
        local_path: Some("attachments/att-4".into()),
        is_community_destination: false,
    };
    harness.attachments.seed(row);
    let job = Job::builder(Variant::AttachmentUpload)
        .thread_id(ThreadId::new())
        .interaction_id(InteractionId::new())
        .details(details("att-4"))
        .build();

    let err = execute(&job, &harness.ctx, &CancellationToken::new()).await.unwrap_err();
    assert!(err.is_permanent());
}

#[tokio::test]
async fn upload_failure_marks_message_send_failed() {
    let harness = FakeHarness::new();
    let interaction_id = InteractionId::new();
    let row = AttachmentRow {
        id: "att-5".into(),
        thread_id: ThreadId::new(),
        interaction_id,
        state: AttachmentState::Downloaded,
        url: None,
        key: None,
        digest: None,
        unpadded_size: None,
        local_path: Some("attachments/att-5".into()),
        is_community_destination: false,
    };
    harness.file_system.seed("attachments/att-5", vec![1]);
    let job = seeded_job(&harness, "att-5", row, interaction_id);
    harness.network.push_upload(Err(NetworkError::Transport("timeout".into())));

    let err = execute(&job, &harness.ctx, &CancellationToken::new()).await.unwrap_err();
    assert!(!err.is_permanent());
    assert!(harness.interactions.marked_failed(interaction_id));
}
