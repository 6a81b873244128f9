// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The materialized, in-memory view the store serves reads from. Every
//! field here is derived solely by folding [`StoreEvent`]s in order; there
//! is no other way to mutate it, which is what makes replay-from-log a
//! faithful reconstruction after a restart.

use crate::events::StoreEvent;
use jobkit_core::{DependencyEdge, Job, JobId};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct JobTable {
    pub(crate) jobs: HashMap<JobId, Job>,
    /// waiter -> edges where this job is the waiter.
    pub(crate) dependencies: HashMap<JobId, Vec<DependencyEdge>>,
    /// blocker -> waiters blocked on it, the reverse index used to wake
    /// waiters once a blocker reaches a terminal state.
    pub(crate) dependents: HashMap<JobId, Vec<JobId>>,
}

impl JobTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &StoreEvent) {
        match event {
            StoreEvent::JobInserted(job) | StoreEvent::JobUpdated(job) => {
                self.jobs.insert(job.id, job.clone());
            }
            StoreEvent::JobDeleted(id) => {
                self.jobs.remove(id);
                if let Some(edges) = self.dependencies.remove(id) {
                    for edge in edges {
                        if let Some(waiters) = self.dependents.get_mut(&edge.blocker) {
                            waiters.retain(|w| w != id);
                        }
                    }
                }
                if let Some(waiters) = self.dependents.remove(id) {
                    for waiter in waiters {
                        if let Some(edges) = self.dependencies.get_mut(&waiter) {
                            edges.retain(|e| e.blocker != *id);
                        }
                    }
                }
            }
            StoreEvent::DependencyAdded(edge) => {
                self.dependencies.entry(edge.waiter).or_default().push(*edge);
                self.dependents.entry(edge.blocker).or_default().push(edge.waiter);
            }
            StoreEvent::DependenciesClearedFor(waiter) => {
                if let Some(edges) = self.dependencies.remove(waiter) {
                    for edge in edges {
                        if let Some(waiters) = self.dependents.get_mut(&edge.blocker) {
                            waiters.retain(|w| w != waiter);
                        }
                    }
                }
            }
        }
    }

    pub fn replay<'a>(events: impl Iterator<Item = &'a StoreEvent>) -> Self {
        let mut table = Self::new();
        for event in events {
            table.apply(event);
        }
        table
    }
}
