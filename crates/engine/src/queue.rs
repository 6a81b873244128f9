// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-variant admission. Each variant gets one [`VariantQueue`]
//! built from its static [`ConcurrencyPolicy`] (overridable per
//! `EngineConfig::concurrency_overrides`). Admission for the
//! parallel/global policies is a `tokio::sync::Semaphore` permit held for
//! the lifetime of the execution task; admission for the per-thread
//! policies is a plain tracked set, since "at most one per thread" has no
//! natural global cap to size a semaphore with.

use jobkit_core::{ConcurrencyPolicy, EngineConfig, ThreadId, Variant};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Held by a spawned execution task for as long as it occupies a slot.
/// Dropping it (task completion, panic unwind, or early return) frees the
/// slot for the next admission attempt.
pub enum AdmissionGuard {
    Permit(OwnedSemaphorePermit),
    PerThread { running: Arc<Mutex<HashSet<Option<ThreadId>>>>, key: Option<ThreadId> },
}

impl Drop for AdmissionGuard {
    fn drop(&mut self) {
        if let AdmissionGuard::PerThread { running, key } = self {
            running.lock().remove(key);
        }
    }
}

enum Kind {
    Global { semaphore: Arc<Semaphore> },
    PerThread { running: Arc<Mutex<HashSet<Option<ThreadId>>>> },
}

pub struct VariantQueue {
    kind: Kind,
}

impl VariantQueue {
    fn new(policy: ConcurrencyPolicy) -> Self {
        let kind = match policy {
            ConcurrencyPolicy::SingleInstance => Kind::Global { semaphore: Arc::new(Semaphore::new(1)) },
            ConcurrencyPolicy::ParallelBounded(n) => {
                Kind::Global { semaphore: Arc::new(Semaphore::new(n.max(1))) }
            }
            ConcurrencyPolicy::SerialPerThread | ConcurrencyPolicy::SingleInstancePerThread => {
                Kind::PerThread { running: Arc::new(Mutex::new(HashSet::new())) }
            }
        };
        Self { kind }
    }

    /// Attempt to reserve a slot for `thread_id`. Returns `None` when the
    /// variant's concurrency cap is currently exhausted (global policies)
    /// or a job of this thread is already running (per-thread policies).
    pub fn try_admit(&self, thread_id: Option<ThreadId>) -> Option<AdmissionGuard> {
        match &self.kind {
            Kind::Global { semaphore } => {
                semaphore.clone().try_acquire_owned().ok().map(AdmissionGuard::Permit)
            }
            Kind::PerThread { running } => {
                let mut guard = running.lock();
                if guard.contains(&thread_id) {
                    None
                } else {
                    guard.insert(thread_id);
                    drop(guard);
                    Some(AdmissionGuard::PerThread { running: running.clone(), key: thread_id })
                }
            }
        }
    }
}

/// All 13 variants' queues, built once at Runner construction.
pub struct QueueSet {
    queues: HashMap<Variant, VariantQueue>,
}

impl QueueSet {
    pub fn new(config: &EngineConfig) -> Self {
        let mut queues = HashMap::new();
        for variant in Variant::ALL {
            let policy = match config.concurrency_overrides.get(&variant) {
                Some(&limit) => ConcurrencyPolicy::ParallelBounded(limit),
                None => variant.spec().concurrency,
            };
            queues.insert(variant, VariantQueue::new(policy));
        }
        Self { queues }
    }

    pub fn try_admit(&self, variant: Variant, thread_id: Option<ThreadId>) -> Option<AdmissionGuard> {
        self.queues.get(&variant).and_then(|q| q.try_admit(thread_id))
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
