// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job run-state.

use serde::{Deserialize, Serialize};

/// The run-state of a persisted [`crate::Job`] row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    /// Blocked on one or more unresolved dependency edges.
    PendingDependencies,
    /// Eligible for admission once `nextRunTimestamp` elapses.
    Runnable,
    /// Bound to exactly one runner slot (invariant I5).
    Running,
    /// Terminal: executor reported success. Transient for `runOnce` jobs,
    /// which are deleted in the same transaction rather than left here.
    Succeeded,
    /// Terminal: permanently failed, row is deleted.
    PermanentlyFailed,
    /// Returned from an execution that asked to be retried later
    /// (`Outcome::Deferred`), distinct from `Runnable` only in that the
    /// failure count was not incremented.
    Deferred,
}

crate::simple_display! {
    Status {
        PendingDependencies => "pendingDependencies",
        Runnable => "runnable",
        Running => "running",
        Succeeded => "succeeded",
        PermanentlyFailed => "permanentlyFailed",
        Deferred => "deferred",
    }
}

impl Status {
    /// Terminal run-states are never re-admitted by the runner.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Succeeded | Status::PermanentlyFailed)
    }

    /// States from which the runner's queue fill may select a job
    /// (deferred jobs are effectively runnable once their timestamp elapses).
    pub fn is_admissible(self) -> bool {
        matches!(self, Status::Runnable | Status::Deferred)
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
