// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::interactions::{InteractionError, InteractionRepository};
use async_trait::async_trait;
use jobkit_core::{InteractionId, ThreadId};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

#[derive(Default)]
pub struct FakeInteractionRepository {
    existing: Mutex<HashSet<InteractionId>>,
    failed_sends: Mutex<HashSet<InteractionId>>,
    info_messages: Mutex<Vec<(ThreadId, String)>>,
    expiries: Mutex<HashMap<InteractionId, u64>>,
    deleted: Mutex<HashSet<InteractionId>>,
}

impl FakeInteractionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_existing(&self, id: InteractionId) {
        self.existing.lock().insert(id);
    }

    pub fn marked_failed(&self, id: InteractionId) -> bool {
        self.failed_sends.lock().contains(&id)
    }

    pub fn info_messages(&self) -> Vec<(ThreadId, String)> {
        self.info_messages.lock().clone()
    }

    /// Seed an interaction whose disappearing-message timer expires at
    /// `expiry_epoch_ms`.
    pub fn seed_expiring(&self, id: InteractionId, expiry_epoch_ms: u64) {
        self.existing.lock().insert(id);
        self.expiries.lock().insert(id, expiry_epoch_ms);
    }

    pub fn was_deleted(&self, id: InteractionId) -> bool {
        self.deleted.lock().contains(&id)
    }
}

#[async_trait]
impl InteractionRepository for FakeInteractionRepository {
    async fn exists(&self, id: InteractionId) -> Result<bool, InteractionError> {
        Ok(self.existing.lock().contains(&id))
    }

    async fn mark_message_send_failed(&self, id: InteractionId) -> Result<(), InteractionError> {
        self.failed_sends.lock().insert(id);
        Ok(())
    }

    async fn insert_info_message(
        &self,
        thread_id: ThreadId,
        text: String,
    ) -> Result<(), InteractionError> {
        self.info_messages.lock().push((thread_id, text));
        Ok(())
    }

    async fn expired_before(&self, now_epoch_ms: u64) -> Result<Vec<InteractionId>, InteractionError> {
        Ok(self
            .expiries
            .lock()
            .iter()
            .filter(|(_, &expiry)| expiry <= now_epoch_ms)
            .map(|(id, _)| *id)
            .collect())
    }

    async fn delete(&self, id: InteractionId) -> Result<(), InteractionError> {
        self.existing.lock().remove(&id);
        self.expiries.lock().remove(&id);
        self.deleted.lock().insert(id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "interactions_tests.rs"]
mod tests;
