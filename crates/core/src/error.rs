// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy returned by executors.
//!
//! Executors never retry in-process; they classify the failure and return
//! it here. The runner's outcome policy (`jobkit_engine::outcome`) is the
//! single place that turns a `JobError` into a state transition.

use thiserror::Error;

/// The conceptual error kinds an executor may raise.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JobError {
    /// The job's `details` could not be decoded, or lacked a field the
    /// executor requires. Permanent: delete the job.
    #[error("missing required details: {0}")]
    MissingRequiredDetails(String),

    /// Unrecoverable failure. Permanent: delete the job and cascade to
    /// waiters unless they opted out with `continue_on_blocker_failure`.
    #[error("permanent failure: {0}")]
    PermanentFailure(String),

    /// Another in-flight job already claims the same unit of work.
    /// `permanent` decides whether this collapses the job (true) or is
    /// treated as an ordinary transient error to retry later (false).
    #[error("possible duplicate job (permanent={permanent}): {reason}")]
    PossibleDuplicateJob { permanent: bool, reason: String },

    /// Cooperative cancellation observed mid-execution. Not a failure:
    /// the job returns to `runnable` with `nextRunTimestamp` unchanged.
    #[error("cancelled")]
    Cancelled,

    /// Local I/O (file system, store) failure. Transient.
    #[error("transient I/O error: {0}")]
    TransientIo(String),

    /// Network/transport failure. Transient.
    #[error("transient network error: {0}")]
    TransientNetwork(String),

    /// Cryptographic operation failed in a way not attributable to bad
    /// input (e.g. a transient provider error). Transient.
    #[error("transient crypto error: {0}")]
    TransientCrypto(String),

    /// The target state was already reached by a previous run (or a
    /// racing job). Success-equivalent: delete without emitting failure
    /// events.
    #[error("already complete")]
    AlreadyComplete,
}

impl JobError {
    /// True if this error, considered alone (ignoring failure-count
    /// budgets), permanently fails the job.
    pub fn is_permanent(&self) -> bool {
        match self {
            JobError::MissingRequiredDetails(_) | JobError::PermanentFailure(_) => true,
            JobError::PossibleDuplicateJob { permanent, .. } => *permanent,
            JobError::Cancelled
            | JobError::TransientIo(_)
            | JobError::TransientNetwork(_)
            | JobError::TransientCrypto(_)
            | JobError::AlreadyComplete => false,
        }
    }

    /// True if this error counts as a successful, silent terminal state
    /// (deleted without incrementing failure events or cascading failure).
    pub fn is_already_complete(&self) -> bool {
        matches!(self, JobError::AlreadyComplete)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, JobError::Cancelled)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
