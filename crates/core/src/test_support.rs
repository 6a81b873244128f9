// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::status::Status;
    use crate::variant::Variant;
    use proptest::prelude::*;

    pub fn arb_status() -> impl Strategy<Value = Status> {
        prop_oneof![
            Just(Status::PendingDependencies),
            Just(Status::Runnable),
            Just(Status::Running),
            Just(Status::Succeeded),
            Just(Status::PermanentlyFailed),
            Just(Status::Deferred),
        ]
    }

    pub fn arb_variant() -> impl Strategy<Value = Variant> {
        prop_oneof![
            Just(Variant::AttachmentDownload),
            Just(Variant::AttachmentUpload),
            Just(Variant::MessageSend),
            Just(Variant::SendReadReceipts),
            Just(Variant::ExpirationUpdate),
            Just(Variant::GetExpiration),
            Just(Variant::FailedAttachmentDownloads),
            Just(Variant::GarbageCollection),
            Just(Variant::RetrieveDefaultOpenGroupRooms),
            Just(Variant::UpdateProfilePicture),
            Just(Variant::CheckForAppUpdates),
            Just(Variant::GroupLeaving),
            Just(Variant::DisappearingMessages),
        ]
    }
}
