// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jobkit_core::JobId;

#[test]
fn waiter_with_no_edges_is_not_blocked() {
    let graph = DependencyGraph::new();
    assert!(!graph.is_blocked(JobId::new()));
}

#[test]
fn waiter_blocked_until_single_blocker_resolves() {
    let waiter = JobId::new();
    let blocker = JobId::new();
    let mut graph = DependencyGraph::new();
    graph.add_edge(DependencyEdge::new(waiter, blocker));
    assert!(graph.is_blocked(waiter));

    let results = graph.resolve_blocker(blocker, false);
    assert_eq!(results, vec![(waiter, WakeAction::Unblocked)]);
    assert!(!graph.is_blocked(waiter));
}

#[test]
fn waiter_stays_blocked_until_all_blockers_resolve() {
    let waiter = JobId::new();
    let b1 = JobId::new();
    let b2 = JobId::new();
    let mut graph = DependencyGraph::new();
    graph.add_edge(DependencyEdge::new(waiter, b1));
    graph.add_edge(DependencyEdge::new(waiter, b2));

    let results = graph.resolve_blocker(b1, false);
    assert_eq!(results, vec![(waiter, WakeAction::StillBlocked)]);
    assert!(graph.is_blocked(waiter));

    let results = graph.resolve_blocker(b2, false);
    assert_eq!(results, vec![(waiter, WakeAction::Unblocked)]);
}

#[test]
fn permanent_blocker_failure_cascades_by_default() {
    let waiter = JobId::new();
    let blocker = JobId::new();
    let mut graph = DependencyGraph::new();
    graph.add_edge(DependencyEdge::new(waiter, blocker));

    let results = graph.resolve_blocker(blocker, true);
    assert_eq!(results, vec![(waiter, WakeAction::CascadeFailure)]);
}

#[test]
fn continue_on_blocker_failure_opts_out_of_cascade() {
    let waiter = JobId::new();
    let blocker = JobId::new();
    let mut graph = DependencyGraph::new();
    graph.add_edge(DependencyEdge::new(waiter, blocker).continue_on_blocker_failure());

    let results = graph.resolve_blocker(blocker, true);
    assert_eq!(results, vec![(waiter, WakeAction::Unblocked)]);
}

#[test]
fn rebuild_reconstructs_pending_state_from_persisted_edges() {
    let waiter = JobId::new();
    let blocker = JobId::new();
    let graph = DependencyGraph::rebuild([DependencyEdge::new(waiter, blocker)]);
    assert!(graph.is_blocked(waiter));
}

#[test]
fn forget_waiter_removes_it_from_dependents_index() {
    let waiter = JobId::new();
    let blocker = JobId::new();
    let mut graph = DependencyGraph::new();
    graph.add_edge(DependencyEdge::new(waiter, blocker));
    graph.forget_waiter(waiter);
    assert!(!graph.is_blocked(waiter));
    // Resolving the blocker now wakes nobody: the waiter was removed.
    assert!(graph.resolve_blocker(blocker, false).is_empty());
}
