// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The in-memory dependency graph: a transient view over the store's
//! persisted `(waiter, blocker)` edges, rebuilt on Runner startup and
//! kept live thereafter. Never holds job pointers directly — integer
//! identifiers and a separate edges table, only `JobId`s here.

use jobkit_core::{DependencyEdge, JobId};
use std::collections::{HashMap, HashSet};

/// How a waiter should react once one of its blockers resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeAction {
    /// All of this waiter's blockers are now resolved: it may become
    /// `runnable` (subject to whatever else gates admission).
    Unblocked,
    /// Still waiting on at least one other blocker.
    StillBlocked,
    /// The blocker that just resolved permanently failed, and this
    /// waiter's edge does not carry `continueOnBlockerFailure`: the
    /// waiter must also be permanently failed.
    CascadeFailure,
}

#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// waiter -> blockers not yet resolved.
    pending: HashMap<JobId, HashSet<JobId>>,
    /// waiter -> every edge it owns (kept even after a blocker resolves,
    /// to answer `continueOnBlockerFailure` for the specific edge).
    edges: HashMap<JobId, Vec<DependencyEdge>>,
    /// blocker -> waiters currently waiting on it.
    dependents: HashMap<JobId, Vec<JobId>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from the store's full edge set (Runner startup).
    pub fn rebuild(all_edges: impl IntoIterator<Item = DependencyEdge>) -> Self {
        let mut graph = Self::new();
        for edge in all_edges {
            graph.add_edge(edge);
        }
        graph
    }

    pub fn add_edge(&mut self, edge: DependencyEdge) {
        self.pending.entry(edge.waiter).or_default().insert(edge.blocker);
        self.dependents.entry(edge.blocker).or_default().push(edge.waiter);
        self.edges.entry(edge.waiter).or_default().push(edge);
    }

    pub fn is_blocked(&self, waiter: JobId) -> bool {
        self.pending.get(&waiter).is_some_and(|blockers| !blockers.is_empty())
    }

    /// Drop all bookkeeping for a waiter once it leaves the graph (it
    /// became runnable, or was itself deleted).
    pub fn forget_waiter(&mut self, waiter: JobId) {
        if let Some(edges) = self.edges.remove(&waiter) {
            for edge in edges {
                if let Some(waiters) = self.dependents.get_mut(&edge.blocker) {
                    waiters.retain(|w| *w != waiter);
                }
            }
        }
        self.pending.remove(&waiter);
    }

    /// A blocker reached a terminal state. Returns `(waiter, action)` for
    /// every waiter that had an edge on this blocker.
    pub fn resolve_blocker(&mut self, blocker: JobId, blocker_permanently_failed: bool) -> Vec<(JobId, WakeAction)> {
        let waiters = self.dependents.remove(&blocker).unwrap_or_default();
        let mut results = Vec::with_capacity(waiters.len());
        for waiter in waiters {
            if let Some(blockers) = self.pending.get_mut(&waiter) {
                blockers.remove(&blocker);
            }
            let continues = self
                .edges
                .get(&waiter)
                .and_then(|edges| edges.iter().find(|e| e.blocker == blocker))
                .map(|e| e.continue_on_blocker_failure)
                .unwrap_or(false);

            let action = if blocker_permanently_failed && !continues {
                WakeAction::CascadeFailure
            } else if self.is_blocked(waiter) {
                WakeAction::StillBlocked
            } else {
                WakeAction::Unblocked
            };
            results.push((waiter, action));
        }
        results
    }
}

#[cfg(test)]
#[path = "dependency_graph_tests.rs"]
mod tests;
