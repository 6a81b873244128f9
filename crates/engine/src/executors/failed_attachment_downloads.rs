// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `failedAttachmentDownloads`: `runOnceAfterLaunch`, single-instance.
//! Sweeps the attachment repository for rows stuck `failedDownload` and
//! re-enqueues a fresh `attachmentDownload` job for each, so a download
//! that failed before the last clean shutdown gets another try without
//! waiting on whatever triggered the original request.

use super::attachment_download::Details as AttachmentDownloadDetails;
use super::encode;
use crate::cancellation;
use crate::context::ExecutionContext;
use crate::error::RunnerError;
use crate::registry::Outcome;
use jobkit_core::{Behaviour, Clock, Job, JobError, JobId, Status, Variant};
use tokio_util::sync::CancellationToken;

pub async fn execute<C: Clock>(
    job: &jobkit_core::Job,
    ctx: &ExecutionContext<C>,
    cancel: &CancellationToken,
) -> Result<Outcome, JobError> {
    let rows = ctx.attachments.failed_downloads().await.map_err(|e| JobError::TransientIo(e.to_string()))?;

    for row in rows {
        cancellation::check(cancel)?;
        let details = encode(&AttachmentDownloadDetails { attachment_id: row.id.clone() });
        let child = Job {
            id: JobId::new(),
            variant: Variant::AttachmentDownload,
            behaviour: Behaviour::RunOnce,
            should_be_unique: true,
            thread_id: Some(row.thread_id),
            interaction_id: Some(row.interaction_id),
            details,
            failure_count: 0,
            next_run_timestamp: 0,
            status: Status::Runnable,
            created_at_epoch_ms: ctx.clock.epoch_ms(),
            updated_at_epoch_ms: ctx.clock.epoch_ms(),
        };
        crate::enqueue::enqueue(ctx.store.as_ref(), child, &[])
            .map_err(|e| JobError::TransientIo(format_enqueue_error(e)))?;
    }

    Ok(Outcome::success(false))
}

fn format_enqueue_error(err: RunnerError) -> String {
    err.to_string()
}

#[cfg(test)]
#[path = "failed_attachment_downloads_tests.rs"]
mod tests;
