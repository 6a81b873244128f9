// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An in-memory file system keyed by path, for exercising attachment and
//! garbage-collection executors without touching disk.

use crate::file_system::{FileSystemClient, FsError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct FakeFileSystem {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl FakeFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        self.files.lock().insert(path.into(), data.into());
    }

    pub fn exists_in_test(&self, path: &Path) -> bool {
        self.files.lock().contains_key(path)
    }
}

#[async_trait]
impl FileSystemClient for FakeFileSystem {
    async fn contents(&self, at_path: &Path) -> Result<Vec<u8>, FsError> {
        self.files
            .lock()
            .get(at_path)
            .cloned()
            .ok_or_else(|| FsError::NotFound(at_path.display().to_string()))
    }

    async fn write(&self, data: &[u8], at_path: &Path, _atomic: bool) -> Result<(), FsError> {
        self.files.lock().insert(at_path.to_path_buf(), data.to_vec());
        Ok(())
    }

    async fn remove_item(&self, at_path: &Path) -> Result<(), FsError> {
        self.files
            .lock()
            .remove(at_path)
            .map(|_| ())
            .ok_or_else(|| FsError::NotFound(at_path.display().to_string()))
    }

    async fn move_item(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let data = self
            .files
            .lock()
            .remove(from)
            .ok_or_else(|| FsError::NotFound(from.display().to_string()))?;
        self.files.lock().insert(to.to_path_buf(), data);
        Ok(())
    }

    async fn contents_of_directory(&self, at_path: &Path) -> Result<Vec<PathBuf>, FsError> {
        Ok(self
            .files
            .lock()
            .keys()
            .filter(|p| p.parent() == Some(at_path))
            .cloned()
            .collect())
    }

    async fn file_exists(&self, at_path: &Path) -> bool {
        self.files.lock().contains_key(at_path)
    }
}

#[cfg(test)]
#[path = "file_system_tests.rs"]
mod tests;
