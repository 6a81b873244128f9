// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `updateProfilePicture`: single-instance, `recurring`. Downloads
//! the local user's current avatar from its configured URL, decrypts it
//! against the carried key, and records the fetched url+key pair in the
//! config store so the UI layer can render it without re-fetching.

use super::{classify_crypto_error, classify_network_error, decode};
use crate::cancellation;
use crate::context::ExecutionContext;
use crate::registry::Outcome;
use jobkit_core::{Clock, JobError};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Serialize, Deserialize)]
struct Details {
    url: String,
    key: Vec<u8>,
}

pub async fn execute<C: Clock>(
    job: &jobkit_core::Job,
    ctx: &ExecutionContext<C>,
    cancel: &CancellationToken,
) -> Result<Outcome, JobError> {
    let details: Details = decode(job)?;

    cancellation::check(cancel)?;
    let prepared = ctx.network.prepare_download(&details.url, None).await.map_err(classify_network_error)?;
    let ciphertext = prepared.send().await.map_err(classify_network_error)?;

    cancellation::check(cancel)?;
    let _plaintext =
        ctx.crypto.decrypt_attachment(&ciphertext, &details.key, &[], None).await.map_err(classify_crypto_error)?;

    ctx.config_store
        .record_profile_picture(details.url, details.key)
        .await
        .map_err(|e| JobError::TransientIo(e.to_string()))?;

    Ok(Outcome::success(false))
}

#[cfg(test)]
#[path = "update_profile_picture_tests.rs"]
mod tests;
