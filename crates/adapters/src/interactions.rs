// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The interaction row collaborator: `attachmentUpload` checks the
//! interaction still exists before uploading; on failure it flips the
//! related message-send job's UI status, and `groupLeaving` writes a
//! user-visible info message on failure.

use async_trait::async_trait;
use jobkit_core::{InteractionId, ThreadId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InteractionError {
    #[error("interaction {0} not found")]
    NotFound(InteractionId),
    #[error("interaction repository error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait InteractionRepository: Send + Sync {
    async fn exists(&self, id: InteractionId) -> Result<bool, InteractionError>;

    /// Flip the message-send UI status to "failed" in the same logical
    /// transaction as the terminal job state write, so user-facing side
    /// effects never observably diverge from the persisted outcome.
    async fn mark_message_send_failed(&self, id: InteractionId) -> Result<(), InteractionError>;

    /// Insert a user-visible system message into a thread, used by
    /// `groupLeaving` on failure.
    async fn insert_info_message(
        &self,
        thread_id: ThreadId,
        text: String,
    ) -> Result<(), InteractionError>;

    /// Interactions whose configured expiry has elapsed by `now_epoch_ms`,
    /// polled by the `disappearingMessages` executor.
    async fn expired_before(&self, now_epoch_ms: u64) -> Result<Vec<InteractionId>, InteractionError>;

    /// Remove an interaction once its disappearing-message deletion has
    /// been requested from peers.
    async fn delete(&self, id: InteractionId) -> Result<(), InteractionError>;
}
