// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `attachmentDownload`: fetches an attachment's ciphertext,
//! decrypts it against its digest, and persists it at its canonical local
//! path. Idempotent against a row already `downloaded`/`uploaded`; detects
//! a racing duplicate by checking whether another running job of this
//! variant already claims the same attachment id.

use super::{classify_crypto_error, classify_fs_error, classify_network_error, decode};
use crate::cancellation;
use crate::context::ExecutionContext;
use crate::registry::Outcome;
use jobkit_adapters::AttachmentState;
use jobkit_core::{Clock, JobError, Variant};
use jobkit_storage::JobFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Details {
    pub(crate) attachment_id: String,
}

pub async fn execute<C: Clock>(
    job: &jobkit_core::Job,
    ctx: &ExecutionContext<C>,
    cancel: &CancellationToken,
) -> Result<Outcome, JobError> {
    let details: Details = decode(job)?;
    let attachment_id = details.attachment_id;

    let row = ctx
        .attachments
        .fetch(&attachment_id)
        .await
        .map_err(|e| JobError::TransientIo(e.to_string()))?
        .ok_or_else(|| JobError::MissingRequiredDetails(format!("no attachment row for {attachment_id}")))?;

    match row.state {
        AttachmentState::Downloaded | AttachmentState::Uploaded => return Ok(Outcome::success(false)),
        AttachmentState::Downloading => {
            let running = ctx
                .store
                .fetch_by_filter(
                    &JobFilter::new()
                        .with_variant(Variant::AttachmentDownload)
                        .excluding(job.id),
                )
                .map_err(|e| JobError::TransientIo(e.to_string()))?;
            let claimed_elsewhere = running.iter().any(|other| {
                other.status == jobkit_core::Status::Running
                    && decode::<Details>(other).map(|d| d.attachment_id) == Ok(attachment_id.clone())
            });
            if claimed_elsewhere {
                return Err(JobError::PossibleDuplicateJob {
                    permanent: true,
                    reason: format!("another attachmentDownload job already claims {attachment_id}"),
                });
            }
            ctx.attachments
                .update_state(&attachment_id, AttachmentState::FailedDownload)
                .await
                .map_err(|e| JobError::TransientIo(e.to_string()))?;
        }
        _ => {}
    }

    cancellation::check(cancel)?;
    ctx.attachments
        .update_state(&attachment_id, AttachmentState::Downloading)
        .await
        .map_err(|e| JobError::TransientIo(e.to_string()))?;

    cancellation::check(cancel)?;
    let prepared = ctx
        .network
        .prepare_download(row.url.as_deref().unwrap_or_default(), None)
        .await
        .map_err(classify_network_error)?;
    let ciphertext = match prepared.send().await {
        Ok(bytes) => bytes,
        Err(err) => {
            let failure = classify_network_error(err);
            let state = if failure.is_permanent() { AttachmentState::Invalid } else { AttachmentState::FailedDownload };
            let _ = ctx.attachments.update_state(&attachment_id, state).await;
            return Err(failure);
        }
    };

    cancellation::check(cancel)?;
    let plaintext = if let (Some(key), Some(digest)) = (&row.key, &row.digest) {
        ctx.crypto
            .decrypt_attachment(&ciphertext, key, digest, row.unpadded_size)
            .await
            .map_err(classify_crypto_error)?
    } else {
        ciphertext
    };

    let temp_path = PathBuf::from(format!("attachments/.tmp-{attachment_id}"));
    let canonical_path = PathBuf::from(format!("attachments/{attachment_id}"));

    cancellation::check(cancel)?;
    ctx.file_system.write(&plaintext, &temp_path, true).await.map_err(classify_fs_error)?;
    ctx.file_system.move_item(&temp_path, &canonical_path).await.map_err(classify_fs_error)?;
    ctx.attachments
        .set_local_path(&attachment_id, canonical_path)
        .await
        .map_err(|e| JobError::TransientIo(e.to_string()))?;
    ctx.attachments
        .update_state(&attachment_id, AttachmentState::Downloaded)
        .await
        .map_err(|e| JobError::TransientIo(e.to_string()))?;

    Ok(Outcome::success(false))
}

#[cfg(test)]
#[path = "attachment_download_tests.rs"]
mod tests;
