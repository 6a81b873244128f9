// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency edges between jobs.

use crate::job::JobId;
use serde::{Deserialize, Serialize};

/// A directed edge *waiter → blocker*: the waiter cannot become runnable
/// until the blocker reaches a terminal state.
///
/// Stored by the job record store as a self-referencing table
/// `(waiter_id, blocker_id)` with a composite primary key; this type is
/// the in-memory/wire shape, never given direct pointers between job
/// records — integer/opaque identifiers plus a separate edges table,
/// not cyclic references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub waiter: JobId,
    pub blocker: JobId,
    /// If the blocker permanently fails, the waiter also permanently
    /// fails unless this is set.
    pub continue_on_blocker_failure: bool,
    /// If true, a permanent blocker failure cascades: the waiter is
    /// force-failed even though `continue_on_blocker_failure` elsewhere
    /// might apply to *its* waiters. Distinct axis from the flag above:
    /// this flag controls what *this* edge's waiter does, the other
    /// flag is read by the same edge when deciding whether to cascade
    /// further.
    pub cascade_failure: bool,
}

impl DependencyEdge {
    pub fn new(waiter: JobId, blocker: JobId) -> Self {
        Self { waiter, blocker, continue_on_blocker_failure: false, cascade_failure: true }
    }

    pub fn continue_on_blocker_failure(mut self) -> Self {
        self.continue_on_blocker_failure = true;
        self
    }
}

#[cfg(test)]
#[path = "dependency_tests.rs"]
mod tests;
