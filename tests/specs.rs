// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cross-crate scenario tests covering the trickiest interactions between
//! the store, the dependency graph, and individual executors. Each test
//! drives the store, an executor, and the outcome policy the way the
//! Runner itself would, through the public `jobkit-engine` API, rather
//! than reaching into Runner internals (which the engine crate's own
//! `runner_tests.rs` already covers from the inside).

use jobkit_adapters::{AttachmentRow, AttachmentState, UploadResponse};
use jobkit_core::{
    DependencyEdge, InteractionId, Job, JobDetails, JobId, Status, ThreadId, Variant,
};
use jobkit_engine::context::test_support::FakeHarness;
use jobkit_engine::outcome::{BlockerOutcome, Resolution};
use jobkit_engine::{registry, Runner};
use jobkit_storage::{JobFilter, JobStore};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn details(value: serde_json::Value) -> JobDetails {
    JobDetails::new(serde_json::to_vec(&value).expect("value serializes"))
}

/// Run one admission cycle for `job_id` by hand: mark it `running`,
/// invoke its executor, and apply the outcome policy — the same
/// sequence `Runner::admit`/`Runner::handle_completion` perform, minus
/// the channel plumbing. Mirrors `handle_completion`'s own dispatch
/// exactly, including which resolutions wake dependents.
async fn run_one_tick(harness: &FakeHarness, job_id: JobId) -> Resolution {
    let mut job = harness.store.fetch_one(job_id).unwrap().expect("job exists");
    job.status = Status::Running;
    harness.store.update(job.clone()).unwrap();

    let cancel = CancellationToken::new();
    let result = registry::execute(&job, &harness.ctx, &cancel).await;
    let now_ms = harness.clock.epoch_ms();
    let resolution = jobkit_engine::outcome::resolve(job, result, &harness.ctx.config, now_ms);
    match &resolution {
        Resolution::Persist(updated) => harness.store.update(updated.clone()).unwrap(),
        Resolution::PersistAndResolve(updated) => {
            harness.store.update(updated.clone()).unwrap();
            wake_dependents(harness, job_id, false);
        }
        Resolution::Delete(blocker_outcome) => {
            harness.store.delete(job_id).unwrap();
            wake_dependents(harness, job_id, matches!(blocker_outcome, BlockerOutcome::PermanentlyFailed));
        }
    }
    resolution
}

/// A blocker's row has just left the store (terminal). Wake every waiter
/// whose edge named it, mirroring [`jobkit_engine::DependencyGraph`]'s
/// policy: unblock once no blocker of a waiter still exists, cascade a
/// permanent failure unless the edge opted out.
fn wake_dependents(harness: &FakeHarness, blocker: JobId, blocker_permanently_failed: bool) {
    let waiters = harness
        .store
        .fetch_by_filter(&JobFilter::new().with_status(Status::PendingDependencies))
        .unwrap();
    for waiter in waiters {
        let edges = harness.store.fetch_dependencies(waiter.id).unwrap();
        let Some(edge) = edges.iter().find(|e| e.blocker == blocker) else { continue };

        if blocker_permanently_failed && !edge.continue_on_blocker_failure {
            harness.store.delete(waiter.id).unwrap();
            wake_dependents(harness, waiter.id, true);
            continue;
        }
        let still_blocked = edges
            .iter()
            .any(|e| e.blocker != blocker && harness.store.fetch_one(e.blocker).unwrap().is_some());
        if !still_blocked {
            let mut job = harness.store.fetch_one(waiter.id).unwrap().unwrap();
            job.status = Status::Runnable;
            harness.store.update(job).unwrap();
        }
    }
}

/// Let a spawned `Runner::run` task settle without pinning to an exact
/// poll count: real time, but short and bounded.
async fn settle() {
    for _ in 0..30 {
        tokio::time::sleep(Duration::from_millis(5)).await;
        tokio::task::yield_now().await;
    }
}

/// Enqueueing the same attachment download twice collapses via
/// `shouldBeUnique`; a racing duplicate that slips past uniqueness (two
/// rows, no shared hash) is caught by the running-set check in
/// `attachmentDownload` itself and rejected as a permanent duplicate.
#[tokio::test]
async fn duplicate_attachment_download_is_rejected() {
    let harness = FakeHarness::new();
    let thread = ThreadId::new();
    let interaction = InteractionId::new();
    let payload = details(serde_json::json!({ "attachment_id": "A" }));

    let first = Job::builder(Variant::AttachmentDownload)
        .thread_id(thread)
        .interaction_id(interaction)
        .should_be_unique(true)
        .details(payload.clone())
        .build();
    let first_id = jobkit_engine::enqueue(&*harness.store, first, &[]).unwrap();

    let second = Job::builder(Variant::AttachmentDownload)
        .thread_id(thread)
        .interaction_id(interaction)
        .should_be_unique(true)
        .details(payload)
        .build();
    let second_id = jobkit_engine::enqueue(&*harness.store, second, &[]).unwrap();

    assert_eq!(first_id, second_id, "uniqueness must collapse the second enqueue into the first row");
    assert_eq!(
        harness.store.fetch_by_filter(&JobFilter::new().with_variant(Variant::AttachmentDownload)).unwrap().len(),
        1
    );

    // Race path: a second, non-unique job observes the first already
    // `running` and claiming the same attachment id while the row itself
    // is mid-download.
    harness.attachments.seed(AttachmentRow {
        id: "A".into(),
        thread_id: thread,
        interaction_id: interaction,
        state: AttachmentState::Downloading,
        url: Some("https://example.invalid/a".into()),
        key: None,
        digest: None,
        unpadded_size: None,
        local_path: None,
        is_community_destination: false,
    });

    let mut racer = Job::builder(Variant::AttachmentDownload)
        .thread_id(thread)
        .interaction_id(interaction)
        .details(details(serde_json::json!({ "attachment_id": "A" })))
        .build();
    racer.status = Status::Running;
    harness.store.insert(racer).unwrap();

    let under_test = Job::builder(Variant::AttachmentDownload)
        .thread_id(thread)
        .interaction_id(interaction)
        .details(details(serde_json::json!({ "attachment_id": "A" })))
        .build();
    let cancel = CancellationToken::new();
    let result = registry::execute(&under_test, &harness.ctx, &cancel).await;

    assert!(
        matches!(result, Err(jobkit_core::JobError::PossibleDuplicateJob { permanent: true, .. })),
        "a second downloader racing the same attachment id must be rejected as a permanent duplicate, got {result:?}"
    );

    let resolution = jobkit_engine::outcome::resolve(under_test, result, &harness.ctx.config, harness.clock.epoch_ms());
    assert_eq!(resolution, Resolution::Delete(BlockerOutcome::PermanentlyFailed));
    assert!(!harness.file_system.exists_in_test(std::path::Path::new("attachments/A")), "the rejected racer must never write to the canonical path");
}

/// `messageSend` depends on `attachmentUpload`; the upload fails
/// transiently three times (within its failure budget of 10) before
/// succeeding on the fourth attempt. `messageSend` must stay
/// `pendingDependencies` through all three failures and only become
/// `runnable` once the fourth attempt's success commits.
#[tokio::test]
async fn message_send_waits_for_blocker_fourth_attempt() {
    let harness = FakeHarness::new();
    let thread = ThreadId::new();
    let interaction = InteractionId::new();

    harness.interactions.seed_existing(interaction);
    harness.file_system.seed("attachments/att-1", b"plaintext bytes".to_vec());
    harness.attachments.seed(AttachmentRow {
        id: "att-1".into(),
        thread_id: thread,
        interaction_id: interaction,
        state: AttachmentState::Downloaded,
        url: None,
        key: None,
        digest: None,
        unpadded_size: None,
        local_path: Some(PathBuf::from("attachments/att-1")),
        is_community_destination: true,
    });

    let upload = Job::builder(Variant::AttachmentUpload)
        .thread_id(thread)
        .interaction_id(interaction)
        .details(details(serde_json::json!({ "attachment_id": "att-1" })))
        .build();
    let upload_id = jobkit_engine::enqueue(&*harness.store, upload, &[]).unwrap();

    let send = Job::builder(Variant::MessageSend)
        .thread_id(thread)
        .interaction_id(interaction)
        .details(details(serde_json::json!({ "payload": [1, 2, 3] })))
        .build();
    let send_id = jobkit_engine::enqueue(&*harness.store, send, &[(upload_id, false)]).unwrap();

    assert_eq!(harness.store.fetch_one(send_id).unwrap().unwrap().status, Status::PendingDependencies);

    // No network result queued: the fake client returns a transport
    // error by default, which attachmentUpload classifies as transient.
    for attempt in 1..=3u32 {
        let resolution = run_one_tick(&harness, upload_id).await;
        match resolution {
            Resolution::Persist(job) => assert_eq!(job.failure_count, attempt),
            other => panic!("attempt {attempt}: expected a transient retry, got {other:?}"),
        }
        assert_eq!(
            harness.store.fetch_one(send_id).unwrap().unwrap().status,
            Status::PendingDependencies,
            "messageSend must not run while its blocker keeps retrying"
        );
    }

    harness.network.push_upload(Ok(UploadResponse { id: "final".into(), url: "https://example.invalid/final".into() }));
    let resolution = run_one_tick(&harness, upload_id).await;
    assert_eq!(resolution, Resolution::Delete(BlockerOutcome::Resolved), "the fourth attempt must succeed and remove the row");

    let send_after = harness.store.fetch_one(send_id).unwrap().unwrap();
    assert_eq!(
        send_after.status,
        Status::Runnable,
        "messageSend becomes runnable strictly after the blocker's fourth-attempt commit"
    );
}

/// A `garbageCollection` row with `recurringOnActive` behaviour is
/// released by `appBecameActive`; firing that transition twice must not
/// spawn a second row, and the second activation should simply re-park
/// or re-release the existing singleton rather than duplicate it.
#[tokio::test]
async fn garbage_collection_recurring_on_active_is_not_duplicated() {
    let harness = FakeHarness::new();
    let runner = Runner::new(harness.ctx.clone());

    runner.app_became_active().unwrap();
    let rows = harness.store.fetch_by_filter(&JobFilter::new().with_variant(Variant::GarbageCollection)).unwrap();
    assert_eq!(rows.len(), 1, "first activation creates exactly one singleton row");
    let gc_id = rows[0].id;

    let resolution = run_one_tick(&harness, gc_id).await;
    match resolution {
        Resolution::PersistAndResolve(job) => assert_eq!(job.next_run_timestamp, u64::MAX, "recurringOnActive parks until the next activation"),
        other => panic!("expected a parked reschedule, got {other:?}"),
    }

    runner.app_became_active().unwrap();
    let rows_after = harness.store.fetch_by_filter(&JobFilter::new().with_variant(Variant::GarbageCollection)).unwrap();
    assert_eq!(rows_after.len(), 1, "a second activation must not duplicate the singleton row");
    assert_ne!(rows_after[0].next_run_timestamp, u64::MAX, "the second activation releases the parked row for its next run");
}

/// Three rows stuck `running`, three `pendingDependencies`, and one
/// `runnable` row due five seconds in the past, simulating a crash.
/// Startup must flip `running` to `runnable` without touching
/// `failureCount`, leave `pendingDependencies` rows untouched, and run
/// the due `runnable` row within its first tick.
#[tokio::test]
async fn crash_recovery_renormalises_rows_on_startup() {
    let harness = FakeHarness::new();
    let store = harness.store.clone();

    for _ in 0..3 {
        let mut job = Job::builder(Variant::GarbageCollection).failure_count(2).build();
        job.status = Status::Running;
        store.insert(job).unwrap();
    }

    // Parked far in the future so it never becomes admissible during this
    // test: what's under test is that a waiter stays pending while its
    // blocker simply hasn't resolved yet, not any particular outcome of
    // the blocker's own execution.
    let blocker = Job::builder(Variant::AttachmentUpload)
        .thread_id(ThreadId::new())
        .interaction_id(InteractionId::new())
        .next_run_timestamp(u64::MAX)
        .build();
    let blocker_id = blocker.id;
    store.insert(blocker).unwrap();

    let mut pending_ids = Vec::new();
    for _ in 0..3 {
        let mut waiter = Job::builder(Variant::MessageSend)
            .thread_id(ThreadId::new())
            .interaction_id(InteractionId::new())
            .build();
        waiter.status = Status::PendingDependencies;
        let id = waiter.id;
        store.insert(waiter).unwrap();
        store.add_dependency(DependencyEdge::new(id, blocker_id)).unwrap();
        pending_ids.push(id);
    }

    let now_secs = harness.clock.epoch_ms() / 1000;
    let due = Job::builder(Variant::CheckForAppUpdates).next_run_timestamp(now_secs.saturating_sub(5)).build();
    store.insert(due).unwrap();

    let runner = Runner::new(harness.ctx.clone());
    let handle = tokio::spawn(runner.run());
    settle().await;

    let gc_rows = store.fetch_by_filter(&JobFilter::new().with_variant(Variant::GarbageCollection)).unwrap();
    assert_eq!(gc_rows.len(), 3, "crash recovery only renormalises status, it never drops rows");
    assert!(gc_rows.iter().all(|j| j.failure_count == 2), "failureCount must survive crash recovery unchanged");
    // garbageCollection is single-instance, so the three recovered rows
    // cycle through running one at a time rather than run concurrently;
    // a recurringOnActive success parks the row back at Runnable with
    // nextRunTimestamp = u64::MAX until the next appBecameActive, so a
    // settled fleet has nothing left running.
    assert!(
        gc_rows.iter().all(|j| j.status == Status::Runnable && j.next_run_timestamp == u64::MAX),
        "each recovered row must have run exactly once and parked, got {gc_rows:?}"
    );

    for id in &pending_ids {
        assert_eq!(
            store.fetch_one(*id).unwrap().unwrap().status,
            Status::PendingDependencies,
            "a waiter whose blocker never resolved must stay pending across a restart"
        );
    }

    let checked = store.fetch_by_filter(&JobFilter::new().with_variant(Variant::CheckForAppUpdates)).unwrap();
    assert_eq!(checked.len(), 1);
    assert!(
        checked[0].next_run_timestamp > now_secs,
        "the due row must have executed within the first tick and been rescheduled forward"
    );

    handle.abort();
}

/// A second `sendReadReceipts` enqueue for the same thread while the
/// first is running becomes the first's dependent; once the first
/// completes, the second runs with its own timestamp set and the first
/// leaves behind a throttled, empty-timestamp successor three seconds
/// out.
#[tokio::test]
async fn send_read_receipts_merges_and_throttles() {
    use jobkit_engine::executors::send_read_receipts;

    let harness = FakeHarness::new();
    let thread = ThreadId::new();

    let first_id =
        send_read_receipts::enqueue(&*harness.store, Some(thread), vec![1, 2, 3], harness.clock.epoch_ms()).unwrap();
    let mut first = harness.store.fetch_one(first_id).unwrap().unwrap();
    first.status = Status::Running;
    harness.store.update(first.clone()).unwrap();

    let second_id =
        send_read_receipts::enqueue(&*harness.store, Some(thread), vec![4, 5], harness.clock.epoch_ms()).unwrap();

    assert_ne!(second_id, first_id, "a running instance must not be merged into directly");
    let second = harness.store.fetch_one(second_id).unwrap().unwrap();
    assert_eq!(second.status, Status::PendingDependencies);
    let edges = harness.store.fetch_dependencies(second_id).unwrap();
    assert_eq!(edges.iter().map(|e| e.blocker).collect::<Vec<_>>(), vec![first_id]);

    harness.network.push_batch(Ok(jobkit_adapters::BatchResponse { status_codes: vec![200], bodies: vec![] }));
    let resolution = run_one_tick(&harness, first_id).await;
    let successor = match resolution {
        Resolution::PersistAndResolve(job) => job,
        other => panic!("sendReadReceipts must reschedule a successor, not terminate, got {other:?}"),
    };
    assert_eq!(
        successor.next_run_timestamp,
        harness.clock.epoch_ms() / 1000 + 3,
        "the throttled successor must be scheduled exactly three seconds out"
    );
    let successor_details: serde_json::Value = serde_json::from_slice(successor.details.bytes()).unwrap();
    assert_eq!(successor_details["timestamp_ms_values"], serde_json::json!([]), "the successor carries no timestamps");

    // run_one_tick already released dependents of `first_id` as part of
    // applying `PersistAndResolve`, mirroring `Runner::handle_completion`.
    let unblocked = harness.store.fetch_one(second_id).unwrap().unwrap();
    assert_eq!(unblocked.status, Status::Runnable);
    let unblocked_details: serde_json::Value = serde_json::from_slice(unblocked.details.bytes()).unwrap();
    assert_eq!(unblocked_details["timestamp_ms_values"], serde_json::json!([4, 5]));
}

/// `checkForAppUpdates` errors with a transient network failure.
/// The executor absorbs the failure itself and reschedules four hours
/// out without the outcome policy ever seeing an `Err`, so
/// `failureCount` stays zero across the retry.
#[tokio::test]
async fn check_for_app_updates_retries_without_incrementing_failures() {
    let harness = FakeHarness::new();
    let job = Job::builder(Variant::CheckForAppUpdates).build();
    let job_id = jobkit_engine::enqueue(&*harness.store, job, &[]).unwrap();

    // No batch result queued: the fake network client's default is a
    // transport error.
    let resolution = run_one_tick(&harness, job_id).await;
    let after_failure = match resolution {
        Resolution::Persist(job) => job,
        other => panic!("expected the job to persist past a transient poll failure, got {other:?}"),
    };
    assert_eq!(after_failure.failure_count, 0);
    assert_eq!(after_failure.next_run_timestamp, harness.clock.epoch_ms() / 1000 + 4 * 60 * 60);

    harness.clock.advance(Duration::from_secs(4 * 60 * 60));
    harness.network.push_batch(Ok(jobkit_adapters::BatchResponse { status_codes: vec![200], bodies: vec![b"9.9.9".to_vec()] }));
    let resolution = run_one_tick(&harness, job_id).await;
    let after_success = match resolution {
        Resolution::PersistAndResolve(job) => job,
        other => panic!("expected the scheduled run to persist again, got {other:?}"),
    };
    assert_eq!(after_success.failure_count, 0);
    assert_eq!(after_success.next_run_timestamp, harness.clock.epoch_ms() / 1000 + 4 * 60 * 60);
}
