// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `retrieveDefaultOpenGroupRooms`: polls the community poller for the
//! curated default-room list and
//! forwards it to the UI layer via the event sink. Single-instance,
//! `runOnce` — producers re-enqueue it when the UI wants a fresh list.

use super::classify_community_error;
use crate::cancellation;
use crate::context::ExecutionContext;
use crate::registry::Outcome;
use jobkit_adapters::ExecutorEvent;
use jobkit_core::{Clock, JobError};
use tokio_util::sync::CancellationToken;

pub async fn execute<C: Clock>(
    job: &jobkit_core::Job,
    ctx: &ExecutionContext<C>,
    cancel: &CancellationToken,
) -> Result<Outcome, JobError> {
    cancellation::check(cancel)?;
    let rooms = ctx.community.fetch_default_rooms().await.map_err(classify_community_error)?;

    ctx.event_sink.emit(ExecutorEvent::DefaultRoomsFetched { job_id: job.id, rooms }).await;

    Ok(Outcome::success(false))
}

#[cfg(test)]
#[path = "retrieve_default_open_group_rooms_tests.rs"]
mod tests;
