// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The write-ahead log's unit of fact. Every mutation the store makes is
//! first expressed as a `StoreEvent`, appended to the log, then folded
//! into the in-memory `JobTable` by [`crate::state::apply`]. Replaying the
//! log from empty reproduces the table exactly, which is what makes
//! crash recovery a replay rather than a special case.

use jobkit_core::{DependencyEdge, Job, JobId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    JobInserted(Job),
    JobUpdated(Job),
    JobDeleted(JobId),
    DependencyAdded(DependencyEdge),
    DependenciesClearedFor(JobId),
}
