// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sendReadReceipts`: batches a thread's read-receipt timestamps into
//! one network call, then reschedules a throttled, empty-timestamp
//! successor three seconds out so a burst of incoming receipts
//! collapses into a steady drip rather than one job per receipt.
//!
//! A second enqueue for the same thread while the first instance is
//! running becomes its dependent — that half of the contract lives in
//! [`enqueue`] below rather than in [`execute`], since it is a decision
//! made at enqueue time, before any executor runs.

use super::{classify_network_error, decode, encode};
use crate::cancellation;
use crate::context::ExecutionContext;
use crate::error::RunnerError;
use crate::registry::Outcome;
use jobkit_adapters::BatchRequest;
use jobkit_core::{Behaviour, Clock, Job, JobError, JobId, Status, ThreadId, Variant};
use jobkit_storage::{JobFilter, JobStore};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Details {
    timestamp_ms_values: Vec<i64>,
}

fn build_job(thread_id: Option<ThreadId>, timestamp_ms_values: Vec<i64>, now_epoch_ms: u64) -> Job {
    Job {
        id: JobId::new(),
        variant: Variant::SendReadReceipts,
        behaviour: Behaviour::Recurring,
        should_be_unique: false,
        thread_id,
        interaction_id: None,
        details: encode(&Details { timestamp_ms_values }),
        failure_count: 0,
        next_run_timestamp: 0,
        status: Status::Runnable,
        created_at_epoch_ms: now_epoch_ms,
        updated_at_epoch_ms: now_epoch_ms,
    }
}

/// Merge `timestamp_ms_values` for `thread_id` into an existing
/// non-running `sendReadReceipts` job, or — if one is currently
/// `running` — enqueue a new job that depends on it. Returns the
/// id of the job the caller should consider "the current batch".
pub fn enqueue(
    store: &dyn JobStore,
    thread_id: Option<ThreadId>,
    timestamp_ms_values: Vec<i64>,
    now_epoch_ms: u64,
) -> Result<JobId, RunnerError> {
    let mut filter = JobFilter::new().with_variant(Variant::SendReadReceipts);
    if let Some(tid) = thread_id {
        filter = filter.with_thread_id(tid);
    }
    let existing = store.fetch_by_filter(&filter)?;

    if let Some(running) = existing.iter().find(|j| j.status == Status::Running) {
        let mut job = build_job(thread_id, timestamp_ms_values, now_epoch_ms);
        job.status = Status::PendingDependencies;
        return crate::enqueue::enqueue(store, job, &[(running.id, false)]);
    }

    crate::enqueue::merge_into_existing(store, Variant::SendReadReceipts, thread_id, |existing| match existing {
        Some(mut job) => {
            let mut current: Details = decode(&job).unwrap_or_default();
            current.timestamp_ms_values.extend(timestamp_ms_values.iter().copied());
            current.timestamp_ms_values.sort_unstable();
            current.timestamp_ms_values.dedup();
            job.details = encode(&current);
            job.updated_at_epoch_ms = now_epoch_ms;
            job
        }
        None => build_job(thread_id, timestamp_ms_values, now_epoch_ms),
    })
}

pub async fn execute<C: Clock>(
    job: &Job,
    ctx: &ExecutionContext<C>,
    cancel: &CancellationToken,
) -> Result<Outcome, JobError> {
    let details: Details = decode(job)?;

    if details.timestamp_ms_values.is_empty() {
        return Ok(throttled_successor(ctx));
    }

    cancellation::check(cancel)?;
    let thread_label = job.thread_id.map(|t| t.to_string()).unwrap_or_else(|| "unscoped".into());
    let body = encode(&details).bytes().to_vec();
    let request = BatchRequest { method: "POST".into(), path: format!("/receipts/{thread_label}"), body };
    let prepared = ctx.network.prepare_batch(vec![request]).await.map_err(classify_network_error)?;

    cancellation::check(cancel)?;
    prepared.send().await.map_err(classify_network_error)?;

    Ok(throttled_successor(ctx))
}

/// Re-schedule a throttled successor with `nextRunTimestamp = now + 3s`
/// and an empty timestamp list.
fn throttled_successor<C: Clock>(ctx: &ExecutionContext<C>) -> Outcome {
    let next_run = ctx.now_epoch_secs() + 3;
    Outcome::Success { stop: false, next_run_override: Some(next_run), details: Some(encode(&Details::default())) }
}

#[cfg(test)]
#[path = "send_read_receipts_tests.rs"]
mod tests;
