// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `getExpiration`: asks the server for the current disappearing-message
//! expiry of a batch of message hashes belonging to the job's thread,
//! and hands the answer to the event sink for the config/UI layer to
//! persist (the engine itself has no expiry column of its own to write
//! back to).

use super::{classify_network_error, decode};
use crate::cancellation;
use crate::context::ExecutionContext;
use crate::registry::Outcome;
use jobkit_adapters::ExecutorEvent;
use jobkit_core::{Clock, JobError};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Serialize, Deserialize)]
struct Details {
    hashes: Vec<String>,
    auth: String,
}

pub async fn execute<C: Clock>(
    job: &jobkit_core::Job,
    ctx: &ExecutionContext<C>,
    cancel: &CancellationToken,
) -> Result<Outcome, JobError> {
    let details: Details = decode(job)?;
    if job.thread_id.is_none() {
        return Err(JobError::MissingRequiredDetails("getExpiration requires a thread id".into()));
    }
    if details.hashes.is_empty() {
        return Ok(Outcome::success(false));
    }

    cancellation::check(cancel)?;
    let prepared =
        ctx.network.prepare_get_expiries(details.hashes, &details.auth).await.map_err(classify_network_error)?;

    cancellation::check(cancel)?;
    let entries = prepared.send().await.map_err(classify_network_error)?;

    ctx.event_sink.emit(ExecutorEvent::ExpiriesFetched { job_id: job.id, entries }).await;

    Ok(Outcome::success(false))
}

#[cfg(test)]
#[path = "get_expiration_tests.rs"]
mod tests;
