// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::config_store::{ConfigStore, ConfigStoreError};
use async_trait::async_trait;
use jobkit_core::ThreadId;
use parking_lot::Mutex;
use std::collections::HashSet;

#[derive(Default)]
pub struct FakeConfigStore {
    profile_picture: Mutex<Option<(String, Vec<u8>)>>,
    removed_groups: Mutex<HashSet<ThreadId>>,
    last_seen_version: Mutex<Option<String>>,
}

impl FakeConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile_picture(&self) -> Option<(String, Vec<u8>)> {
        self.profile_picture.lock().clone()
    }

    pub fn group_data_removed(&self, thread_id: ThreadId) -> bool {
        self.removed_groups.lock().contains(&thread_id)
    }
}

#[async_trait]
impl ConfigStore for FakeConfigStore {
    async fn record_profile_picture(&self, url: String, key: Vec<u8>) -> Result<(), ConfigStoreError> {
        *self.profile_picture.lock() = Some((url, key));
        Ok(())
    }

    async fn remove_local_group_data(&self, thread_id: ThreadId) -> Result<(), ConfigStoreError> {
        self.removed_groups.lock().insert(thread_id);
        Ok(())
    }

    async fn last_seen_app_version(&self) -> Result<Option<String>, ConfigStoreError> {
        Ok(self.last_seen_version.lock().clone())
    }

    async fn record_seen_app_version(&self, version: String) -> Result<(), ConfigStoreError> {
        *self.last_seen_version.lock() = Some(version);
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_store_tests.rs"]
mod tests;
