// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `garbageCollection`: `recurringOnActive`. Deletes orphaned rows —
//! those whose `threadId`/`interactionId` no longer resolve to an
//! existing entity — then reconciles on-disk blobs for the rows just
//! removed. File reconciliation always runs *after* the DB delete
//! commits, never before, and a missing-file error on cleanup is
//! non-fatal.
//!
//! A full cleanup pass also covers typing-indicator, link-preview,
//! profile, dedup-record, shadow-thread, and pending-receipt sweeps.
//! Those tables live in the app's own relational store, outside the
//! collaborator interfaces this engine defines (the persistent store
//! remains a sibling concern beyond job/attachment/interaction rows);
//! only the orphaned-attachment sweep (modeled by
//! [`jobkit_adapters::AttachmentRepository::orphaned`]) has a collaborator
//! to drive it here.

use crate::cancellation;
use crate::context::ExecutionContext;
use crate::registry::Outcome;
use jobkit_core::{Clock, JobError};
use tokio_util::sync::CancellationToken;

pub async fn execute<C: Clock>(
    _job: &jobkit_core::Job,
    ctx: &ExecutionContext<C>,
    cancel: &CancellationToken,
) -> Result<Outcome, JobError> {
    let orphans = ctx.attachments.orphaned().await.map_err(|e| JobError::TransientIo(e.to_string()))?;

    let mut deleted = 0usize;
    for row in orphans {
        cancellation::check(cancel)?;
        ctx.attachments.delete(&row.id).await.map_err(|e| JobError::TransientIo(e.to_string()))?;

        if let Some(path) = row.local_path {
            match ctx.file_system.remove_item(&path).await {
                Ok(()) => {}
                Err(jobkit_adapters::FsError::NotFound(_)) => {}
                Err(err) => tracing::warn!(attachment_id = %row.id, error = %err, "gc: file removal failed"),
            }
        }
        deleted += 1;
    }

    tracing::info!(deleted, "garbage collection pass complete");
    Ok(Outcome::success(false))
}

#[cfg(test)]
#[path = "garbage_collection_tests.rs"]
mod tests;
