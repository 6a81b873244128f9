// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `expirationUpdate`: pushes a new
//! disappearing-message expiry (or a shorten-only update) for a batch of
//! message hashes belonging to the job's thread.

use super::{classify_network_error, decode};
use crate::cancellation;
use crate::context::ExecutionContext;
use crate::registry::Outcome;
use jobkit_core::{Clock, JobError};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Serialize, Deserialize)]
struct Details {
    hashes: Vec<String>,
    new_expiry_ms: u64,
    shorten_only: bool,
    auth: String,
}

pub async fn execute<C: Clock>(
    job: &jobkit_core::Job,
    ctx: &ExecutionContext<C>,
    cancel: &CancellationToken,
) -> Result<Outcome, JobError> {
    let details: Details = decode(job)?;
    if job.thread_id.is_none() {
        return Err(JobError::MissingRequiredDetails("expirationUpdate requires a thread id".into()));
    }
    if details.hashes.is_empty() {
        return Err(JobError::AlreadyComplete);
    }

    cancellation::check(cancel)?;
    let prepared = ctx
        .network
        .prepare_update_expiry(details.hashes, details.new_expiry_ms, details.shorten_only, &details.auth)
        .await
        .map_err(classify_network_error)?;

    cancellation::check(cancel)?;
    prepared.send().await.map_err(classify_network_error)?;

    Ok(Outcome::success(false))
}

#[cfg(test)]
#[path = "expiration_update_tests.rs"]
mod tests;
