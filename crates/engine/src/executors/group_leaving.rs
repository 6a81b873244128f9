// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `groupLeaving`: `maxFailureCount = 0`, serial-per-thread. Branches on
//! the thread's kind and the caller's admin standing: a legacy group
//! sends a plain leave message; a new group performs a cooperative
//! delete-for-all, which only an admin may request. `maxFailureCount =
//! 0` means the outcome policy already treats any returned error as
//! permanent on the first attempt (`1 > 0`), so this executor does not
//! need to self-classify permanence — only emit the user-visible
//! failure message the contract calls for before propagating.

use super::{classify_network_error, decode};
use crate::cancellation;
use crate::context::ExecutionContext;
use crate::registry::Outcome;
use jobkit_adapters::BatchRequest;
use jobkit_core::{Clock, JobError};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupThreadKind {
    LegacyGroup,
    NewGroup,
    Community,
}

#[derive(Debug, Serialize, Deserialize)]
struct Details {
    thread_kind: GroupThreadKind,
    is_admin: bool,
    is_last_admin: bool,
}

pub async fn execute<C: Clock>(
    job: &jobkit_core::Job,
    ctx: &ExecutionContext<C>,
    cancel: &CancellationToken,
) -> Result<Outcome, JobError> {
    let details: Details = decode(job)?;
    let thread_id = job
        .thread_id
        .ok_or_else(|| JobError::MissingRequiredDetails("groupLeaving requires a thread id".into()))?;

    cancellation::check(cancel)?;
    let path = match details.thread_kind {
        GroupThreadKind::LegacyGroup | GroupThreadKind::Community => format!("/groups/{thread_id}/leave"),
        GroupThreadKind::NewGroup if details.is_admin && details.is_last_admin => {
            format!("/groups/{thread_id}/delete-for-all")
        }
        GroupThreadKind::NewGroup => format!("/groups/{thread_id}/leave"),
    };
    let request = BatchRequest { method: "POST".into(), path, body: Vec::new() };

    let result: Result<(), JobError> = async {
        let prepared = ctx.network.prepare_batch(vec![request]).await.map_err(classify_network_error)?;
        prepared.send().await.map_err(classify_network_error)?;
        Ok(())
    }
    .await;

    if let Err(err) = result {
        let _ = ctx.interactions.insert_info_message(thread_id, "Failed to leave group".to_string()).await;
        return Err(err);
    }

    ctx.config_store.remove_local_group_data(thread_id).await.map_err(|e| JobError::TransientIo(e.to_string()))?;

    Ok(Outcome::success(false))
}

#[cfg(test)]
#[path = "group_leaving_tests.rs"]
mod tests;
