// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use jobkit_core::JobId;
use thiserror::Error;

/// Failures surfaced by the job record store.
///
/// These are store-level failures (I/O, corruption, conflicting writes),
/// distinct from `jobkit_core::JobError`, which describes the outcome of
/// *running* a job.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("job {0} not found")]
    NotFound(JobId),

    #[error("job {0} already exists")]
    AlreadyExists(JobId),

    #[error("dependency from {waiter} on {blocker} would not resolve: blocker not found")]
    UnknownBlocker { waiter: JobId, blocker: JobId },

    #[error("write-ahead log error: {0}")]
    Wal(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
