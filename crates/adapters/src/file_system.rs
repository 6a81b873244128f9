// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The file system collaborator: attachment blob I/O. Missing-file
//! removals are non-fatal — callers (garbage collection, attachment
//! executors) decide when a `NotFound` on `remove_item` is safe to ignore,
//! this trait just reports it faithfully.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(String),
}

#[async_trait]
pub trait FileSystemClient: Send + Sync {
    async fn contents(&self, at_path: &Path) -> Result<Vec<u8>, FsError>;

    async fn write(&self, data: &[u8], at_path: &Path, atomic: bool) -> Result<(), FsError>;

    async fn remove_item(&self, at_path: &Path) -> Result<(), FsError>;

    async fn move_item(&self, from: &Path, to: &Path) -> Result<(), FsError>;

    async fn contents_of_directory(&self, at_path: &Path) -> Result<Vec<PathBuf>, FsError>;

    async fn file_exists(&self, at_path: &Path) -> bool;
}
