// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `checkForAppUpdates`: polls the update feed once every four hours and
//! records the latest seen version.
//!
//! A transient network failure here does not increment `failureCount`
//! at all — the job persists with `failureCount = 0` and runs again at
//! the scheduled time four hours later. Rather than return an error for
//! the outcome policy to classify (which would increment the count),
//! this executor reports transient failures as `Deferred` with an
//! explicit four-hour `next_run_timestamp`, which `Job::apply_deferred`
//! leaves `failure_count` untouched by construction.

use super::{classify_network_error, decode};
use crate::cancellation;
use crate::context::ExecutionContext;
use crate::registry::Outcome;
use jobkit_adapters::BatchRequest;
use jobkit_core::{Clock, JobError};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

const CHECK_INTERVAL_SECS: u64 = 4 * 60 * 60;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Details {
    #[serde(default)]
    feed_path: Option<String>,
}

pub async fn execute<C: Clock>(
    job: &jobkit_core::Job,
    ctx: &ExecutionContext<C>,
    cancel: &CancellationToken,
) -> Result<Outcome, JobError> {
    let details: Details = decode(job).unwrap_or_default();
    let next_run = ctx.now_epoch_secs() + CHECK_INTERVAL_SECS;

    cancellation::check(cancel)?;
    let path = details.feed_path.unwrap_or_else(|| "/releases/latest".into());
    let request = BatchRequest { method: "GET".into(), path, body: Vec::new() };
    let prepared = match ctx.network.prepare_batch(vec![request]).await {
        Ok(prepared) => prepared,
        Err(_) => return Ok(Outcome::deferred(next_run)),
    };

    let response = match prepared.send().await {
        Ok(response) => response,
        Err(err) => {
            let _ = classify_network_error(err);
            return Ok(Outcome::deferred(next_run));
        }
    };

    if let Some(body) = response.bodies.first() {
        if let Ok(version) = String::from_utf8(body.clone()) {
            ctx.config_store
                .record_seen_app_version(version)
                .await
                .map_err(|e| JobError::TransientIo(e.to_string()))?;
        }
    }

    Ok(Outcome::success_at(false, next_run))
}

#[cfg(test)]
#[path = "check_for_app_updates_tests.rs"]
mod tests;
