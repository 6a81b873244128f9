// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One module per [`jobkit_core::Variant`], each exposing an
//! `execute<C: Clock>(job, ctx, cancel) -> Result<Outcome, JobError>`
//! matching the [`crate::registry::execute`] dispatch table. Shared
//! decode/classification helpers live here rather than being duplicated
//! across every variant.

pub mod attachment_download;
pub mod attachment_upload;
pub mod check_for_app_updates;
pub mod disappearing_messages;
pub mod expiration_update;
pub mod failed_attachment_downloads;
pub mod garbage_collection;
pub mod get_expiration;
pub mod group_leaving;
pub mod message_send;
pub mod retrieve_default_open_group_rooms;
pub mod send_read_receipts;
pub mod update_profile_picture;

use jobkit_adapters::{CommunityError, ConfigStoreError, CryptoError, FsError, InteractionError, NetworkError};
use jobkit_core::{Job, JobDetails, JobError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Decode a job's opaque `details` bytes into the variant-specific struct
/// an executor expects (the reference producer uses a self-describing
/// serialization). A decode failure is always permanent: the row can
/// never be retried into success.
pub fn decode<T: DeserializeOwned>(job: &Job) -> Result<T, JobError> {
    serde_json::from_slice(job.details.bytes())
        .map_err(|e| JobError::MissingRequiredDetails(e.to_string()))
}

/// The inverse of [`decode`]: serialize a variant-specific struct back
/// into the opaque bytes a job row carries. Used by executors that
/// rewrite their own `details` between runs (`sendReadReceipts` draining
/// its timestamp batch) and by producers enqueuing a child job of a
/// known variant (`failedAttachmentDownloads` re-enqueuing a fresh
/// `attachmentDownload`).
pub fn encode<T: Serialize>(value: &T) -> JobDetails {
    JobDetails::new(serde_json::to_vec(value).unwrap_or_default())
}

/// Classify a [`NetworkError`] using the default mapping: not-found and
/// client errors are permanent, everything else is transient.
/// Individual executors override specific arms where their contract names
/// a different classification (e.g. `attachmentDownload`'s 404 handling).
pub fn classify_network_error(err: NetworkError) -> JobError {
    match err {
        NetworkError::NotFound | NetworkError::BadRequest(_) | NetworkError::Unauthorised => {
            JobError::PermanentFailure(err.to_string())
        }
        NetworkError::ParsingFailed(_) | NetworkError::MaxFileSizeExceeded => {
            JobError::PermanentFailure(err.to_string())
        }
        NetworkError::InvalidResponse(_) | NetworkError::Transport(_) => {
            JobError::TransientNetwork(err.to_string())
        }
    }
}

pub fn classify_crypto_error(err: CryptoError) -> JobError {
    match err {
        CryptoError::Transient(_) => JobError::TransientCrypto(err.to_string()),
        CryptoError::DecryptionFailed(_) | CryptoError::EncryptionFailed(_) | CryptoError::SignatureInvalid(_) => {
            JobError::PermanentFailure(err.to_string())
        }
    }
}

pub fn classify_fs_error(err: FsError) -> JobError {
    match err {
        FsError::NotFound(_) => JobError::TransientIo(err.to_string()),
        FsError::Io(_) => JobError::TransientIo(err.to_string()),
    }
}

pub fn classify_interaction_error(err: InteractionError) -> JobError {
    JobError::TransientIo(err.to_string())
}

pub fn classify_community_error(err: CommunityError) -> JobError {
    JobError::TransientNetwork(err.to_string())
}

pub fn classify_config_store_error(err: ConfigStoreError) -> JobError {
    JobError::TransientIo(err.to_string())
}
