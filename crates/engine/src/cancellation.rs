// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cooperative cancellation.
//!
//! Every running job gets a child of the Runner's root token. Executors
//! must check it after every suspension point (network send, store
//! transaction, file I/O); a cancelled check returns `JobError::Cancelled`,
//! which the outcome policy treats as a return to `runnable` rather than a
//! failure.

use jobkit_core::JobError;
use tokio_util::sync::CancellationToken;

/// Raise `Cancelled` if `token` has been triggered since the last check.
pub fn check(token: &CancellationToken) -> Result<(), JobError> {
    if token.is_cancelled() {
        return Err(JobError::Cancelled);
    }
    Ok(())
}

#[cfg(test)]
#[path = "cancellation_tests.rs"]
mod tests;
