// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Producer-facing enqueue helpers: inserting a row, wiring dependency
//! edges, collapsing into an existing row under "unique" admission, and
//! the idempotent merge `sendReadReceipts`-style executors rely on.

use crate::error::RunnerError;
use jobkit_core::{DependencyEdge, Job, JobId, Status};
use jobkit_storage::{JobFilter, JobStore};

/// Insert `job`, wiring it to `blockers` (waiter → blocker edges, each
/// with its own `continueOnBlockerFailure` flag) and collapsing into an
/// existing non-terminal row if `job.should_be_unique` and a matching
/// `(variant, thread_id, details_hash)` row is already live.
///
/// Blockers, if any, put the job in `pendingDependencies` rather than
/// `runnable` at enqueue time.
pub fn enqueue(
    store: &dyn JobStore,
    mut job: Job,
    blockers: &[(JobId, bool)],
) -> Result<JobId, RunnerError> {
    if !blockers.is_empty() {
        job.status = Status::PendingDependencies;
    }

    if let Some((variant, thread_id, hash)) = job.uniqueness_key() {
        let mut filter = JobFilter::new().with_variant(variant);
        if let Some(thread_id) = thread_id {
            filter = filter.with_thread_id(thread_id);
        }
        let existing = store
            .fetch_by_filter(&filter)?
            .into_iter()
            .find(|existing| !existing.is_terminal() && existing.details.hash() == hash);
        if let Some(existing) = existing {
            return Ok(existing.id);
        }
    }

    let id = job.id;
    store.transaction(&mut |tx| {
        tx.insert(job.clone())?;
        for (blocker, continue_on_blocker_failure) in blockers {
            let mut edge = DependencyEdge::new(id, *blocker);
            if *continue_on_blocker_failure {
                edge = edge.continue_on_blocker_failure();
            }
            tx.add_dependency(edge)?;
        }
        Ok(())
    })?;
    Ok(id)
}

/// Fetch the single non-`running` row of `variant` for `thread_id`, if
/// any, merge it with `build`, and insert-or-update. Used by
/// `sendReadReceipts` to batch timestamps into an existing job rather
/// than spawning a duplicate one per call.
///
/// `build` receives the existing row (`None` if this is the first job for
/// the thread) and returns the row to persist.
pub fn merge_into_existing(
    store: &dyn JobStore,
    variant: jobkit_core::Variant,
    thread_id: Option<jobkit_core::ThreadId>,
    build: impl FnOnce(Option<Job>) -> Job,
) -> Result<JobId, RunnerError> {
    let mut filter = JobFilter::new().with_variant(variant);
    if let Some(thread_id) = thread_id {
        filter = filter.with_thread_id(thread_id);
    }
    let existing = store
        .fetch_by_filter(&filter)?
        .into_iter()
        .find(|job| job.status != Status::Running && !job.is_terminal());

    match existing {
        Some(existing) => {
            let id = existing.id;
            let merged = build(Some(existing));
            store.update(merged)?;
            Ok(id)
        }
        None => {
            let job = build(None);
            let id = job.id;
            store.insert(job)?;
            Ok(id)
        }
    }
}

#[cfg(test)]
#[path = "enqueue_tests.rs"]
mod tests;
