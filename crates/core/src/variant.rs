// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job variants and their static scheduling metadata.

use serde::{Deserialize, Serialize};

/// The kind of work a job performs.
///
/// Each variant has fixed scheduling metadata (failure budget, thread/
/// interaction requirements, concurrency policy, default behaviour) looked
/// up via [`Variant::spec`]. The engine never branches on variant identity
/// outside of the executor registry lookup and this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Variant {
    AttachmentDownload,
    AttachmentUpload,
    MessageSend,
    SendReadReceipts,
    ExpirationUpdate,
    GetExpiration,
    FailedAttachmentDownloads,
    GarbageCollection,
    RetrieveDefaultOpenGroupRooms,
    UpdateProfilePicture,
    CheckForAppUpdates,
    GroupLeaving,
    DisappearingMessages,
}

crate::simple_display! {
    Variant {
        AttachmentDownload => "attachmentDownload",
        AttachmentUpload => "attachmentUpload",
        MessageSend => "messageSend",
        SendReadReceipts => "sendReadReceipts",
        ExpirationUpdate => "expirationUpdate",
        GetExpiration => "getExpiration",
        FailedAttachmentDownloads => "failedAttachmentDownloads",
        GarbageCollection => "garbageCollection",
        RetrieveDefaultOpenGroupRooms => "retrieveDefaultOpenGroupRooms",
        UpdateProfilePicture => "updateProfilePicture",
        CheckForAppUpdates => "checkForAppUpdates",
        GroupLeaving => "groupLeaving",
        DisappearingMessages => "disappearingMessages",
    }
}

impl Variant {
    /// All variants, in the order they appear in the spec's variant table.
    pub const ALL: [Variant; 13] = [
        Variant::AttachmentDownload,
        Variant::AttachmentUpload,
        Variant::MessageSend,
        Variant::SendReadReceipts,
        Variant::ExpirationUpdate,
        Variant::GetExpiration,
        Variant::FailedAttachmentDownloads,
        Variant::GarbageCollection,
        Variant::RetrieveDefaultOpenGroupRooms,
        Variant::UpdateProfilePicture,
        Variant::CheckForAppUpdates,
        Variant::GroupLeaving,
        Variant::DisappearingMessages,
    ];

    /// Static scheduling metadata for this variant.
    pub const fn spec(self) -> VariantSpec {
        use ConcurrencyPolicy::*;
        match self {
            Variant::AttachmentDownload => VariantSpec {
                max_failure_count: FailureBudget::Bounded(3),
                requires_thread_id: true,
                requires_interaction_id: true,
                concurrency: ParallelBounded(4),
                default_behaviour: Behaviour::RunOnce,
            },
            Variant::AttachmentUpload => VariantSpec {
                max_failure_count: FailureBudget::Bounded(10),
                requires_thread_id: true,
                requires_interaction_id: true,
                concurrency: ParallelBounded(4),
                default_behaviour: Behaviour::RunOnce,
            },
            Variant::MessageSend => VariantSpec {
                max_failure_count: FailureBudget::Bounded(10),
                requires_thread_id: true,
                requires_interaction_id: true,
                concurrency: SerialPerThread,
                default_behaviour: Behaviour::RunOnce,
            },
            Variant::SendReadReceipts => VariantSpec {
                max_failure_count: FailureBudget::Unbounded,
                requires_thread_id: false,
                requires_interaction_id: false,
                concurrency: SingleInstancePerThread,
                default_behaviour: Behaviour::Recurring,
            },
            Variant::ExpirationUpdate => VariantSpec {
                max_failure_count: FailureBudget::Unbounded,
                requires_thread_id: true,
                requires_interaction_id: false,
                concurrency: ParallelBounded(4),
                default_behaviour: Behaviour::RunOnce,
            },
            Variant::GetExpiration => VariantSpec {
                max_failure_count: FailureBudget::Unbounded,
                requires_thread_id: true,
                requires_interaction_id: false,
                concurrency: ParallelBounded(4),
                default_behaviour: Behaviour::RunOnce,
            },
            Variant::FailedAttachmentDownloads => VariantSpec {
                max_failure_count: FailureBudget::Unbounded,
                requires_thread_id: false,
                requires_interaction_id: false,
                concurrency: SingleInstance,
                default_behaviour: Behaviour::RunOnceAfterLaunch,
            },
            Variant::GarbageCollection => VariantSpec {
                max_failure_count: FailureBudget::Unbounded,
                requires_thread_id: false,
                requires_interaction_id: false,
                concurrency: SingleInstance,
                default_behaviour: Behaviour::RecurringOnActive,
            },
            Variant::RetrieveDefaultOpenGroupRooms => VariantSpec {
                max_failure_count: FailureBudget::Unbounded,
                requires_thread_id: false,
                requires_interaction_id: false,
                concurrency: SingleInstance,
                default_behaviour: Behaviour::RunOnce,
            },
            Variant::UpdateProfilePicture => VariantSpec {
                max_failure_count: FailureBudget::Unbounded,
                requires_thread_id: false,
                requires_interaction_id: false,
                concurrency: SingleInstance,
                default_behaviour: Behaviour::Recurring,
            },
            Variant::CheckForAppUpdates => VariantSpec {
                max_failure_count: FailureBudget::Unbounded,
                requires_thread_id: false,
                requires_interaction_id: false,
                concurrency: SingleInstance,
                default_behaviour: Behaviour::Recurring,
            },
            Variant::GroupLeaving => VariantSpec {
                max_failure_count: FailureBudget::Bounded(0),
                requires_thread_id: true,
                requires_interaction_id: true,
                concurrency: SerialPerThread,
                default_behaviour: Behaviour::RunOnce,
            },
            Variant::DisappearingMessages => VariantSpec {
                max_failure_count: FailureBudget::Unbounded,
                requires_thread_id: false,
                requires_interaction_id: false,
                concurrency: SingleInstance,
                default_behaviour: Behaviour::Recurring,
            },
        }
    }
}

/// A job's failure budget: either a bounded count (where 0 means "first
/// error is permanent") or unbounded retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureBudget {
    Bounded(u32),
    Unbounded,
}

impl FailureBudget {
    /// True if `failure_count` exceeds this budget (permanent failure by count alone).
    pub fn exceeded(self, failure_count: u32) -> bool {
        match self {
            FailureBudget::Bounded(max) => failure_count > max,
            FailureBudget::Unbounded => false,
        }
    }
}

/// Admission policy for a variant's logical queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcurrencyPolicy {
    /// At most one `running` job per `(variant, thread_id)`.
    SerialPerThread,
    /// At most one `running` row of the variant globally.
    SingleInstance,
    /// At most one `running` row of the variant per thread (distinct from
    /// `SingleInstance`, which is global — `sendReadReceipts` uses this).
    SingleInstancePerThread,
    /// Up to N concurrent jobs of the variant.
    ParallelBounded(usize),
}

/// How a job is rescheduled after a successful, non-stop run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Behaviour {
    RunOnce,
    Recurring,
    RecurringOnActive,
    RecurringOnLaunch,
    /// Delay, in seconds, before the first run after being scheduled.
    RunOnceAfter(u64),
    /// Convenience alias used by variants that should run once, shortly
    /// after process launch, with no further automatic rescheduling.
    RunOnceAfterLaunch,
}

/// Static, compile-time scheduling metadata for a [`Variant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSpec {
    pub max_failure_count: FailureBudget,
    pub requires_thread_id: bool,
    pub requires_interaction_id: bool,
    pub concurrency: ConcurrencyPolicy,
    pub default_behaviour: Behaviour,
}

#[cfg(test)]
#[path = "variant_tests.rs"]
mod tests;
