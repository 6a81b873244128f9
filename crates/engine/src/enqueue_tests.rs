// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jobkit_core::{JobDetails, Status, ThreadId, Variant};
use jobkit_storage::WalJobStore;

#[test]
fn plain_enqueue_inserts_runnable_job() {
    let store = WalJobStore::in_memory();
    let job = Job::builder(Variant::GarbageCollection).build();
    let id = enqueue(&store, job, &[]).unwrap();
    let fetched = store.fetch_one(id).unwrap().unwrap();
    assert_eq!(fetched.status, Status::Runnable);
}

#[test]
fn enqueue_with_blockers_starts_pending_dependencies() {
    let store = WalJobStore::in_memory();
    let blocker = Job::builder(Variant::AttachmentUpload)
        .thread_id(ThreadId::new())
        .interaction_id(jobkit_core::InteractionId::new())
        .build();
    let blocker_id = blocker.id;
    store.insert(blocker).unwrap();

    let waiter = Job::builder(Variant::MessageSend)
        .thread_id(ThreadId::new())
        .interaction_id(jobkit_core::InteractionId::new())
        .build();
    let waiter_id = enqueue(&store, waiter, &[(blocker_id, false)]).unwrap();

    let fetched = store.fetch_one(waiter_id).unwrap().unwrap();
    assert_eq!(fetched.status, Status::PendingDependencies);
    let edges = store.fetch_dependencies(waiter_id).unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].blocker, blocker_id);
}

#[test]
fn duplicate_unique_job_collapses_into_existing_row() {
    let store = WalJobStore::in_memory();
    let thread_id = ThreadId::new();
    let details = JobDetails::new(b"attachment-A".to_vec());
    let first = Job::builder(Variant::AttachmentDownload)
        .thread_id(thread_id)
        .interaction_id(jobkit_core::InteractionId::new())
        .should_be_unique(true)
        .details(details.clone())
        .build();
    let first_id = enqueue(&store, first, &[]).unwrap();

    let second = Job::builder(Variant::AttachmentDownload)
        .thread_id(thread_id)
        .interaction_id(jobkit_core::InteractionId::new())
        .should_be_unique(true)
        .details(details)
        .build();
    let second_id = enqueue(&store, second, &[]).unwrap();

    assert_eq!(first_id, second_id);
    assert_eq!(store.fetch_by_filter(&JobFilter::new().with_variant(Variant::AttachmentDownload)).unwrap().len(), 1);
}

#[test]
fn merge_into_existing_creates_first_row() {
    let store = WalJobStore::in_memory();
    let thread_id = ThreadId::new();
    let id = merge_into_existing(&store, Variant::SendReadReceipts, Some(thread_id), |existing| {
        assert!(existing.is_none());
        Job::builder(Variant::SendReadReceipts).thread_id(thread_id).build()
    })
    .unwrap();
    assert!(store.fetch_one(id).unwrap().is_some());
}

#[test]
fn merge_into_existing_folds_into_non_running_row() {
    let store = WalJobStore::in_memory();
    let thread_id = ThreadId::new();
    let first = Job::builder(Variant::SendReadReceipts)
        .thread_id(thread_id)
        .details(JobDetails::new(b"[1,2,3]".to_vec()))
        .build();
    let first_id = first.id;
    store.insert(first).unwrap();

    let merged_id = merge_into_existing(&store, Variant::SendReadReceipts, Some(thread_id), |existing| {
        let mut job = existing.expect("existing row");
        job.details = JobDetails::new(b"[1,2,3,4]".to_vec());
        job
    })
    .unwrap();

    assert_eq!(merged_id, first_id);
    assert_eq!(
        store.fetch_by_filter(&JobFilter::new().with_variant(Variant::SendReadReceipts)).unwrap().len(),
        1
    );
}

#[test]
fn merge_into_existing_skips_a_currently_running_row() {
    let store = WalJobStore::in_memory();
    let thread_id = ThreadId::new();
    let mut running = Job::builder(Variant::SendReadReceipts).thread_id(thread_id).build();
    running.status = Status::Running;
    let running_id = running.id;
    store.insert(running).unwrap();

    let new_id = merge_into_existing(&store, Variant::SendReadReceipts, Some(thread_id), |existing| {
        assert!(existing.is_none());
        Job::builder(Variant::SendReadReceipts).thread_id(thread_id).build()
    })
    .unwrap();

    assert_ne!(new_id, running_id);
}
