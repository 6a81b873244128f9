// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `attachmentUpload`: strips metadata, encrypts unless the
//! destination is a community (SOGS) server, uploads, then moves the
//! plaintext blob to its final hashed path and marks the row `uploaded`.
//! Defers while the attachment is still mid-download (it cannot upload
//! what it has not finished fetching); fails the related message-send
//! job's UI status on any terminal error.

use super::{classify_crypto_error, classify_fs_error, classify_interaction_error, classify_network_error, decode};
use crate::cancellation;
use crate::context::ExecutionContext;
use crate::registry::Outcome;
use jobkit_adapters::{AttachmentState, ExecutorEvent};
use jobkit_core::{Clock, JobError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Serialize, Deserialize)]
struct Details {
    attachment_id: String,
}

pub async fn execute<C: Clock>(
    job: &jobkit_core::Job,
    ctx: &ExecutionContext<C>,
    cancel: &CancellationToken,
) -> Result<Outcome, JobError> {
    let details: Details = decode(job)?;
    let attachment_id = details.attachment_id;

    let interaction_id = job
        .interaction_id
        .ok_or_else(|| JobError::MissingRequiredDetails("attachmentUpload requires an interaction id".into()))?;
    if !ctx.interactions.exists(interaction_id).await.map_err(classify_interaction_error)? {
        return Err(JobError::PermanentFailure(format!("interaction {interaction_id} no longer exists")));
    }

    let row = ctx
        .attachments
        .fetch(&attachment_id)
        .await
        .map_err(|e| JobError::TransientIo(e.to_string()))?
        .ok_or_else(|| JobError::MissingRequiredDetails(format!("no attachment row for {attachment_id}")))?;

    match row.state {
        AttachmentState::Uploaded => return Ok(Outcome::success(false)),
        AttachmentState::PendingDownload | AttachmentState::Downloading => {
            return Ok(Outcome::deferred(ctx.now_epoch_secs() + ctx.config.min_defer_backoff_secs));
        }
        _ => {}
    }

    let local_path = row
        .local_path
        .clone()
        .ok_or_else(|| JobError::MissingRequiredDetails(format!("attachment {attachment_id} has no local blob")))?;

    cancellation::check(cancel)?;
    ctx.attachments.update_state(&attachment_id, AttachmentState::Uploading).await.map_err(|e| JobError::TransientIo(e.to_string()))?;

    let plaintext = ctx.file_system.contents(&local_path).await.map_err(classify_fs_error)?;

    cancellation::check(cancel)?;
    let to_upload = if row.is_community_destination {
        plaintext.clone()
    } else {
        let key = row.key.clone().unwrap_or_default();
        ctx.crypto.encrypt_attachment(&plaintext, &key).await.map_err(classify_crypto_error)?
    };

    ctx.event_sink.emit(ExecutorEvent::WillUpload { job_id: job.id, attachment_id: attachment_id.clone() }).await;

    cancellation::check(cancel)?;
    let prepared = ctx.network.prepare_upload(to_upload, None).await.map_err(classify_network_error)?;
    let response = match prepared.send().await {
        Ok(response) => response,
        Err(err) => {
            let failure = classify_network_error(err);
            let _ = ctx.interactions.mark_message_send_failed(interaction_id).await;
            return Err(failure);
        }
    };

    let final_path = PathBuf::from(format!("attachments/{}", response.id));
    cancellation::check(cancel)?;
    ctx.file_system.move_item(&local_path, &final_path).await.map_err(classify_fs_error)?;
    ctx.attachments.set_local_path(&attachment_id, final_path).await.map_err(|e| JobError::TransientIo(e.to_string()))?;
    ctx.attachments.update_state(&attachment_id, AttachmentState::Uploaded).await.map_err(|e| JobError::TransientIo(e.to_string()))?;

    ctx.event_sink.emit(ExecutorEvent::UploadSucceeded { job_id: job.id, attachment_id }).await;

    Ok(Outcome::success(false))
}

#[cfg(test)]
#[path = "attachment_upload_tests.rs"]
mod tests;
