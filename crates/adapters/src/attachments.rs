// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The attachment row collaborator: the persistent store's attachment
//! table, named as an external collaborator. This is the interface it
//! must satisfy for the two attachment executors.

use async_trait::async_trait;
use jobkit_core::{InteractionId, ThreadId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttachmentState {
    PendingDownload,
    Downloading,
    Downloaded,
    Uploading,
    Uploaded,
    FailedDownload,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentRow {
    pub id: String,
    pub thread_id: ThreadId,
    pub interaction_id: InteractionId,
    pub state: AttachmentState,
    pub url: Option<String>,
    pub key: Option<Vec<u8>>,
    pub digest: Option<Vec<u8>>,
    pub unpadded_size: Option<u64>,
    pub local_path: Option<PathBuf>,
    /// True when the upload destination is a community (SOGS) server,
    /// which stores attachments unencrypted.
    pub is_community_destination: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("attachment {0} not found")]
    NotFound(String),
    #[error("attachment repository error: {0}")]
    Backend(String),
}

/// The attachment table's narrow interface, never the engine's own
/// concern to persist: it belongs to the app's relational store.
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<Option<AttachmentRow>, AttachmentError>;

    async fn update_state(&self, id: &str, state: AttachmentState) -> Result<(), AttachmentError>;

    async fn set_local_path(&self, id: &str, path: PathBuf) -> Result<(), AttachmentError>;

    /// Rows whose `thread_id`/`interaction_id` no longer resolve to an
    /// existing entity, targeted by orphan garbage collection.
    async fn orphaned(&self) -> Result<Vec<AttachmentRow>, AttachmentError>;

    /// Rows currently `failedDownload`, polled by the
    /// `failedAttachmentDownloads` executor to re-enqueue a fresh
    /// `attachmentDownload` job for each.
    async fn failed_downloads(&self) -> Result<Vec<AttachmentRow>, AttachmentError>;

    async fn delete(&self, id: &str) -> Result<(), AttachmentError>;
}
