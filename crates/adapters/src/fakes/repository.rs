// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An in-memory attachment repository, seeded directly by tests.

use crate::attachments::{AttachmentError, AttachmentRepository, AttachmentRow, AttachmentState};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

#[derive(Default)]
pub struct FakeAttachmentRepository {
    rows: Mutex<HashMap<String, AttachmentRow>>,
    orphans: Mutex<HashSet<String>>,
}

impl FakeAttachmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, row: AttachmentRow) {
        self.rows.lock().insert(row.id.clone(), row);
    }

    /// Mark a seeded row as orphaned (its thread/interaction no longer
    /// exists), so `orphaned()` returns it for garbage collection tests.
    pub fn mark_orphaned(&self, id: impl Into<String>) {
        self.orphans.lock().insert(id.into());
    }

    pub fn state_of(&self, id: &str) -> Option<AttachmentState> {
        self.rows.lock().get(id).map(|r| r.state)
    }

    pub fn local_path_of(&self, id: &str) -> Option<PathBuf> {
        self.rows.lock().get(id).and_then(|r| r.local_path.clone())
    }
}

#[async_trait]
impl AttachmentRepository for FakeAttachmentRepository {
    async fn fetch(&self, id: &str) -> Result<Option<AttachmentRow>, AttachmentError> {
        Ok(self.rows.lock().get(id).cloned())
    }

    async fn update_state(&self, id: &str, state: AttachmentState) -> Result<(), AttachmentError> {
        let mut rows = self.rows.lock();
        let row = rows.get_mut(id).ok_or_else(|| AttachmentError::NotFound(id.to_string()))?;
        row.state = state;
        Ok(())
    }

    async fn set_local_path(&self, id: &str, path: PathBuf) -> Result<(), AttachmentError> {
        let mut rows = self.rows.lock();
        let row = rows.get_mut(id).ok_or_else(|| AttachmentError::NotFound(id.to_string()))?;
        row.local_path = Some(path);
        Ok(())
    }

    async fn orphaned(&self) -> Result<Vec<AttachmentRow>, AttachmentError> {
        let orphans = self.orphans.lock();
        Ok(self.rows.lock().values().filter(|r| orphans.contains(&r.id)).cloned().collect())
    }

    async fn failed_downloads(&self) -> Result<Vec<AttachmentRow>, AttachmentError> {
        Ok(self
            .rows
            .lock()
            .values()
            .filter(|r| r.state == AttachmentState::FailedDownload)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &str) -> Result<(), AttachmentError> {
        self.rows
            .lock()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AttachmentError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
