// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner-level failures, distinct from [`jobkit_core::JobError`] (which
//! describes the outcome of running one job) and
//! [`jobkit_storage::StoreError`] (store-level I/O/corruption failures).

use jobkit_core::{EnqueueError, JobId};
use jobkit_storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Enqueue(#[from] EnqueueError),

    #[error("job {0} not found")]
    NotFound(JobId),

    #[error("job {0} is not running")]
    NotRunning(JobId),

    #[error("Runner::run called more than once")]
    AlreadyRunning,
}
