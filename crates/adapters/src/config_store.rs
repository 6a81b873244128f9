// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The remote-synced, versioned user/contact/group config store
//! ("libSession"), kept external to the job engine. Executors only ever
//! read/write the narrow slices named in their contracts
//! (`updateProfilePicture` records the new avatar; `groupLeaving` removes
//! local group data; `checkForAppUpdates` records the last-seen version).

use async_trait::async_trait;
use jobkit_core::ThreadId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigStoreError {
    #[error("config store error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Record a newly-fetched profile picture (url + decryption key) for
    /// the local user.
    async fn record_profile_picture(&self, url: String, key: Vec<u8>) -> Result<(), ConfigStoreError>;

    /// Remove a group/community's local config after `groupLeaving`
    /// completes successfully.
    async fn remove_local_group_data(&self, thread_id: ThreadId) -> Result<(), ConfigStoreError>;

    /// Last app version this client recorded having checked for
    /// (`checkForAppUpdates` reads this to decide whether to notify).
    async fn last_seen_app_version(&self) -> Result<Option<String>, ConfigStoreError>;

    async fn record_seen_app_version(&self, version: String) -> Result<(), ConfigStoreError>;
}
