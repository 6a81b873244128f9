// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `messageSend`: hands the job's opaque wire payload to the network
//! client as a single batch request addressed to the job's thread. The
//! concrete wire format is out of scope; this executor only classifies
//! the transport outcome.

use super::{classify_network_error, decode};
use crate::cancellation;
use crate::context::ExecutionContext;
use crate::registry::Outcome;
use jobkit_adapters::BatchRequest;
use jobkit_core::{Clock, JobError};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Serialize, Deserialize)]
struct Details {
    payload: Vec<u8>,
}

pub async fn execute<C: Clock>(
    job: &jobkit_core::Job,
    ctx: &ExecutionContext<C>,
    cancel: &CancellationToken,
) -> Result<Outcome, JobError> {
    let details: Details = decode(job)?;
    let thread_id = job
        .thread_id
        .ok_or_else(|| JobError::MissingRequiredDetails("messageSend requires a thread id".into()))?;

    cancellation::check(cancel)?;
    let request = BatchRequest { method: "POST".into(), path: format!("/messages/{thread_id}"), body: details.payload };
    let prepared = ctx.network.prepare_batch(vec![request]).await.map_err(classify_network_error)?;

    cancellation::check(cancel)?;
    let response = prepared.send().await.map_err(classify_network_error)?;

    match response.status_codes.first().copied() {
        Some(code) if (200..300).contains(&code) => Ok(Outcome::success(false)),
        Some(code) if code == 400 || code == 401 => {
            Err(JobError::PermanentFailure(format!("message send rejected with status {code}")))
        }
        Some(code) => Err(JobError::TransientNetwork(format!("message send failed with status {code}"))),
        None => Err(JobError::TransientNetwork("message send returned no status".into())),
    }
}

#[cfg(test)]
#[path = "message_send_tests.rs"]
mod tests;
