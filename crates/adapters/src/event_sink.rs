// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Optional hooks executors emit for UI and config layers. Sinks are
//! registered per invocation and never influence the outcome policy;
//! they are fire-and-forget notifications.

use async_trait::async_trait;
use jobkit_core::JobId;

use crate::attachments::AttachmentState;
use crate::community::OpenGroupRoom;
use crate::network::ExpiryEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorEvent {
    /// Emitted by `attachmentUpload` just before the network call begins.
    WillUpload { job_id: JobId, attachment_id: String },
    /// Emitted by `attachmentUpload` on success.
    UploadSucceeded { job_id: JobId, attachment_id: String },
    AttachmentStateChanged { attachment_id: String, state: AttachmentState },
    /// Emitted by `getExpiration` once the server has answered, for the
    /// config/UI layer to persist against its own interaction rows (the
    /// engine itself has no expiry column to write back to).
    ExpiriesFetched { job_id: JobId, entries: Vec<ExpiryEntry> },
    /// Emitted by `retrieveDefaultOpenGroupRooms` once the community
    /// poller has answered, for the UI layer to render the discovery
    /// list.
    DefaultRoomsFetched { job_id: JobId, rooms: Vec<OpenGroupRoom> },
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: ExecutorEvent);
}
