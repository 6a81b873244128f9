// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `disappearingMessages`: single-instance, `recurring`, unbounded
//! failures. Analogous to `garbageCollection`'s shape but scoped to
//! expiration rather than orphan cleanup — scans for interactions whose
//! configured expiry has elapsed and requests their deletion from peers
//! before removing the local row. No UI or wire-format behavior is
//! invented beyond the
//! [`jobkit_adapters::NetworkClient`]/[`jobkit_adapters::InteractionRepository`]
//! shapes this crate already models (the concrete wire format is out of
//! scope).

use super::classify_network_error;
use crate::cancellation;
use crate::context::ExecutionContext;
use crate::registry::Outcome;
use jobkit_adapters::BatchRequest;
use jobkit_core::{Clock, JobError};
use tokio_util::sync::CancellationToken;

pub async fn execute<C: Clock>(
    _job: &jobkit_core::Job,
    ctx: &ExecutionContext<C>,
    cancel: &CancellationToken,
) -> Result<Outcome, JobError> {
    let expired = ctx
        .interactions
        .expired_before(ctx.clock.epoch_ms())
        .await
        .map_err(|e| JobError::TransientIo(e.to_string()))?;

    let mut deleted = 0usize;
    for interaction_id in expired {
        cancellation::check(cancel)?;
        let request =
            BatchRequest { method: "POST".into(), path: format!("/interactions/{interaction_id}/expire"), body: Vec::new() };
        match ctx.network.prepare_batch(vec![request]).await {
            Ok(prepared) => {
                if let Err(err) = prepared.send().await {
                    tracing::warn!(%interaction_id, error = %classify_network_error(err), "disappearing message expiry notice failed");
                }
            }
            Err(err) => {
                tracing::warn!(%interaction_id, error = %classify_network_error(err), "disappearing message expiry notice failed");
            }
        }
        ctx.interactions.delete(interaction_id).await.map_err(|e| JobError::TransientIo(e.to_string()))?;
        deleted += 1;
    }

    tracing::info!(deleted, "disappearing message sweep complete");
    Ok(Outcome::success(false))
}

#[cfg(test)]
#[path = "disappearing_messages_tests.rs"]
mod tests;
