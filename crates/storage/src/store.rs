// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job record store.
//!
//! `WalJobStore` is the reference implementation: a [`JobTable`] guarded
//! by a single [`parking_lot::Mutex`], durable via an optional
//! [`Wal`]. Every mutation, whether made directly or inside a
//! [`JobStore::transaction`] closure, is expressed first as a
//! [`StoreEvent`] so the table can always be rebuilt by replay.

use crate::error::StoreError;
use crate::events::StoreEvent;
use crate::filter::JobFilter;
use crate::state::JobTable;
use crate::wal::Wal;
use jobkit_core::{DependencyEdge, Job, JobId, Status};
use parking_lot::Mutex;
use std::path::Path;

/// A staged, not-yet-committed view handed to a `transaction` closure.
/// Mutations made through `Transaction` are only visible to later calls
/// within the same closure; they are folded into the store's committed
/// state only if the closure returns `Ok`.
pub struct Transaction {
    draft: JobTable,
    pending: Vec<StoreEvent>,
}

impl Transaction {
    fn record(&mut self, event: StoreEvent) {
        self.draft.apply(&event);
        self.pending.push(event);
    }

    pub fn insert(&mut self, job: Job) -> Result<(), StoreError> {
        if self.draft.jobs.contains_key(&job.id) {
            return Err(StoreError::AlreadyExists(job.id));
        }
        self.record(StoreEvent::JobInserted(job));
        Ok(())
    }

    pub fn upsert(&mut self, job: Job) {
        self.record(StoreEvent::JobUpdated(job));
    }

    pub fn update(&mut self, job: Job) -> Result<(), StoreError> {
        if !self.draft.jobs.contains_key(&job.id) {
            return Err(StoreError::NotFound(job.id));
        }
        self.record(StoreEvent::JobUpdated(job));
        Ok(())
    }

    pub fn delete(&mut self, id: JobId) -> Result<(), StoreError> {
        if !self.draft.jobs.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        self.record(StoreEvent::JobDeleted(id));
        Ok(())
    }

    pub fn add_dependency(&mut self, edge: DependencyEdge) -> Result<(), StoreError> {
        if !self.draft.jobs.contains_key(&edge.blocker) {
            return Err(StoreError::UnknownBlocker { waiter: edge.waiter, blocker: edge.blocker });
        }
        self.record(StoreEvent::DependencyAdded(edge));
        Ok(())
    }

    pub fn fetch_one(&self, id: JobId) -> Option<&Job> {
        self.draft.jobs.get(&id)
    }

    pub fn fetch_dependencies(&self, waiter: JobId) -> &[DependencyEdge] {
        self.draft.dependencies.get(&waiter).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

/// Durable, thread-safe job record store.
pub trait JobStore: Send + Sync {
    fn insert(&self, job: Job) -> Result<(), StoreError>;
    fn upsert(&self, job: Job) -> Result<(), StoreError>;
    fn update(&self, job: Job) -> Result<(), StoreError>;
    fn delete(&self, id: JobId) -> Result<(), StoreError>;
    fn fetch_one(&self, id: JobId) -> Result<Option<Job>, StoreError>;
    fn fetch_by_filter(&self, filter: &JobFilter) -> Result<Vec<Job>, StoreError>;
    fn add_dependency(&self, edge: DependencyEdge) -> Result<(), StoreError>;
    fn fetch_dependencies(&self, waiter: JobId) -> Result<Vec<DependencyEdge>, StoreError>;

    /// Jobs eligible to run at `now_epoch_secs`: `Runnable`, or `Deferred`
    /// with `next_run_timestamp <= now`. Ordered `(next_run_timestamp
    /// ASC, id ASC)` so the runner drains in a stable, starvation-free
    /// order.
    fn fetch_runnable(&self, now_epoch_secs: u64) -> Result<Vec<Job>, StoreError>;

    /// Startup recovery: any row left `Running` by a process that
    /// died mid-execution is returned to `Runnable` so the runner picks
    /// it back up. Returns the number of rows transitioned.
    fn mark_all_running_as_runnable(&self, now_epoch_ms: u64) -> Result<usize, StoreError>;

    /// Run `f` against a staged view of the store; its mutations commit
    /// atomically (and durably, if a WAL is attached) only if `f` returns
    /// `Ok`.
    ///
    /// Takes a `&mut dyn FnMut` rather than a generic `impl FnOnce` so the
    /// trait stays object-safe (`ExecutionContext` holds `Arc<dyn
    /// JobStore>`); every call site here only ever needs to run `f` once.
    fn transaction(
        &self,
        f: &mut dyn FnMut(&mut Transaction) -> Result<(), StoreError>,
    ) -> Result<(), StoreError>;
}

struct Inner {
    table: JobTable,
    wal: Option<Wal>,
}

/// Reference [`JobStore`] implementation: an in-memory [`JobTable`] with
/// an optional on-disk write-ahead log for durability across restarts.
pub struct WalJobStore {
    inner: Mutex<Inner>,
}

impl WalJobStore {
    /// A store with no durability: state lives only as long as the
    /// process does. Used in unit tests and anywhere persistence is the
    /// embedder's concern, not the engine's.
    pub fn in_memory() -> Self {
        Self { inner: Mutex::new(Inner { table: JobTable::new(), wal: None }) }
    }

    /// Open (or create) a durable store backed by a write-ahead log at
    /// `path`, replaying any events already on disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let wal = Wal::open(path)?;
        let events = wal.replay()?;
        tracing::info!(path = %path.display(), events = events.len(), "replayed job store wal");
        let table = JobTable::replay(events.iter());
        Ok(Self { inner: Mutex::new(Inner { table, wal: Some(wal) }) })
    }

    fn commit(&self, mut inner: parking_lot::MutexGuard<'_, Inner>, events: &[StoreEvent]) -> Result<(), StoreError> {
        if let Some(wal) = inner.wal.as_mut() {
            for event in events {
                wal.append(event)?;
            }
        }
        for event in events {
            inner.table.apply(event);
        }
        Ok(())
    }
}

impl JobStore for WalJobStore {
    fn insert(&self, job: Job) -> Result<(), StoreError> {
        self.transaction(&mut |tx| tx.insert(job.clone()))
    }

    fn upsert(&self, job: Job) -> Result<(), StoreError> {
        self.transaction(&mut |tx| {
            tx.upsert(job.clone());
            Ok(())
        })
    }

    fn update(&self, job: Job) -> Result<(), StoreError> {
        self.transaction(&mut |tx| tx.update(job.clone()))
    }

    fn delete(&self, id: JobId) -> Result<(), StoreError> {
        self.transaction(&mut |tx| tx.delete(id))
    }

    fn fetch_one(&self, id: JobId) -> Result<Option<Job>, StoreError> {
        Ok(self.inner.lock().table.jobs.get(&id).cloned())
    }

    fn fetch_by_filter(&self, filter: &JobFilter) -> Result<Vec<Job>, StoreError> {
        let inner = self.inner.lock();
        let mut out: Vec<Job> = inner.table.jobs.values().filter(|j| filter.matches(j)).cloned().collect();
        out.sort_by(|a, b| a.next_run_timestamp.cmp(&b.next_run_timestamp).then_with(|| a.id.as_str().cmp(b.id.as_str())));
        Ok(out)
    }

    fn add_dependency(&self, edge: DependencyEdge) -> Result<(), StoreError> {
        self.transaction(&mut |tx| tx.add_dependency(edge))
    }

    fn fetch_dependencies(&self, waiter: JobId) -> Result<Vec<DependencyEdge>, StoreError> {
        Ok(self.inner.lock().table.dependencies.get(&waiter).cloned().unwrap_or_default())
    }

    fn fetch_runnable(&self, now_epoch_secs: u64) -> Result<Vec<Job>, StoreError> {
        let inner = self.inner.lock();
        let mut out: Vec<Job> = inner
            .table
            .jobs
            .values()
            .filter(|j| j.status.is_admissible() && j.next_run_timestamp <= now_epoch_secs)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.next_run_timestamp.cmp(&b.next_run_timestamp).then_with(|| a.id.as_str().cmp(b.id.as_str())));
        Ok(out)
    }

    fn mark_all_running_as_runnable(&self, now_epoch_ms: u64) -> Result<usize, StoreError> {
        let stuck: Vec<JobId> = {
            let inner = self.inner.lock();
            inner.table.jobs.values().filter(|j| j.status == Status::Running).map(|j| j.id).collect()
        };
        let count = stuck.len();
        if count > 0 {
            tracing::warn!(count, "recovering jobs stuck in running state at startup");
        }
        self.transaction(&mut |tx| {
            for id in &stuck {
                if let Some(job) = tx.fetch_one(*id).cloned() {
                    let mut job = job;
                    job.status = Status::Runnable;
                    job.updated_at_epoch_ms = now_epoch_ms;
                    tx.upsert(job);
                }
            }
            Ok(())
        })?;
        Ok(count)
    }

    fn transaction(
        &self,
        f: &mut dyn FnMut(&mut Transaction) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        let inner = self.inner.lock();
        let mut tx = Transaction { draft: inner.table.clone(), pending: Vec::new() };
        drop(inner);
        f(&mut tx)?;
        let inner = self.inner.lock();
        self.commit(inner, &tx.pending)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
