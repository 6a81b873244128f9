// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The executor registry: a tagged variant of executor descriptors keyed
//! off the `Variant` enumeration, modeled as a constant table with
//! table-lookup dispatch rather than an inheritance hierarchy. The
//! "descriptor" half of that table already lives in
//! [`jobkit_core::Variant::spec`]; this module is the "execute" half, one
//! function per variant under `executors/`, dispatched by a single match.

use crate::context::ExecutionContext;
use crate::executors;
use jobkit_core::{Clock, Job, JobDetails, JobError, Variant};
use tokio_util::sync::CancellationToken;

/// What an executor invocation produced: a `Success(J', stop)` /
/// `Deferred(J')` shape. The returned `details`, when present, replaces
/// the job's stored details (an executor that narrows or enriches its
/// own parameters between runs, e.g. `sendReadReceipts` draining its
/// batched timestamp list).
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `stop = true` removes the job from rotation even for recurring
    /// behaviours.
    Success { stop: bool, next_run_override: Option<u64>, details: Option<JobDetails> },
    /// Return to `runnable` at `next_run_timestamp`, honoring whichever of
    /// that or `now + minBackoff` is later; `failureCount` is left
    /// untouched.
    Deferred { next_run_timestamp: u64, details: Option<JobDetails> },
}

impl Outcome {
    pub fn success(stop: bool) -> Self {
        Self::Success { stop, next_run_override: None, details: None }
    }

    pub fn success_with_details(stop: bool, details: JobDetails) -> Self {
        Self::Success { stop, next_run_override: None, details: Some(details) }
    }

    pub fn success_at(stop: bool, next_run_timestamp: u64) -> Self {
        Self::Success { stop, next_run_override: Some(next_run_timestamp), details: None }
    }

    pub fn deferred(next_run_timestamp: u64) -> Self {
        Self::Deferred { next_run_timestamp, details: None }
    }

    pub fn deferred_with_details(next_run_timestamp: u64, details: JobDetails) -> Self {
        Self::Deferred { next_run_timestamp, details: Some(details) }
    }
}

/// Constant dispatch table: one arm per [`Variant`], matching the
/// `Variant::spec` table's shape rather than a trait-object vtable, since
/// every executor already shares the same `(job, ctx, cancel)` signature
/// and there is no per-variant state to hold beyond what `ctx` carries.
pub async fn execute<C: Clock>(
    job: &Job,
    ctx: &ExecutionContext<C>,
    cancel: &CancellationToken,
) -> Result<Outcome, JobError> {
    match job.variant {
        Variant::AttachmentDownload => executors::attachment_download::execute(job, ctx, cancel).await,
        Variant::AttachmentUpload => executors::attachment_upload::execute(job, ctx, cancel).await,
        Variant::MessageSend => executors::message_send::execute(job, ctx, cancel).await,
        Variant::SendReadReceipts => executors::send_read_receipts::execute(job, ctx, cancel).await,
        Variant::ExpirationUpdate => executors::expiration_update::execute(job, ctx, cancel).await,
        Variant::GetExpiration => executors::get_expiration::execute(job, ctx, cancel).await,
        Variant::FailedAttachmentDownloads => {
            executors::failed_attachment_downloads::execute(job, ctx, cancel).await
        }
        Variant::GarbageCollection => executors::garbage_collection::execute(job, ctx, cancel).await,
        Variant::RetrieveDefaultOpenGroupRooms => {
            executors::retrieve_default_open_group_rooms::execute(job, ctx, cancel).await
        }
        Variant::UpdateProfilePicture => executors::update_profile_picture::execute(job, ctx, cancel).await,
        Variant::CheckForAppUpdates => executors::check_for_app_updates::execute(job, ctx, cancel).await,
        Variant::GroupLeaving => executors::group_leaving::execute(job, ctx, cancel).await,
        Variant::DisappearingMessages => executors::disappearing_messages::execute(job, ctx, cancel).await,
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
