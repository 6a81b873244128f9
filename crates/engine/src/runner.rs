// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Runner: the single task that owns every mutable piece of
//! scheduling state (admission queues, the dependency graph, the
//! in-flight set). Executors never touch this state directly; they
//! communicate purely by returning an [`crate::registry::Outcome`]
//! over the completion channel.
//!
//! `Runner::run` is the task body. Every other public method (`wake`,
//! `cancel`, `suspend`, ...) is safe to call from any task holding an
//! `Arc<Runner<C>>` concurrently with `run`; they either send over the
//! wake channel or take the `inflight`/`graph` locks for the span of a
//! single, non-blocking operation.

use crate::context::ExecutionContext;
use crate::dependency_graph::{DependencyGraph, WakeAction};
use crate::error::RunnerError;
use crate::outcome::{self, BlockerOutcome, Resolution};
use crate::queue::{AdmissionGuard, QueueSet};
use crate::registry;
use jobkit_core::{Behaviour, Clock, ConcurrencyPolicy, Job, JobDetails, JobId, Status, Variant};
use jobkit_storage::{JobFilter, JobStore};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// What woke the Runner up. Producers external to the Runner (an
/// `enqueue` caller, a dependency resolution observed elsewhere, the
/// embedder's app-lifecycle hooks) notify it through [`Runner::wake`]
/// rather than mutating Runner state themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeReason {
    Enqueued,
    DependencyResolved,
    Tick,
    AppBecameActive,
    AppBecameInactive,
    CancelAll(Option<Variant>),
}

struct Completion {
    job: Job,
    result: Result<registry::Outcome, jobkit_core::JobError>,
}

/// Owns all mutable scheduling state; every field besides the two
/// channels and the atomics is either read-only after construction or
/// internally synchronised.
pub struct Runner<C: Clock> {
    ctx: ExecutionContext<C>,
    queues: QueueSet,
    graph: Mutex<DependencyGraph>,
    inflight: Mutex<HashMap<JobId, CancellationToken>>,
    suspended: AtomicBool,
    root_cancel: CancellationToken,
    wake_tx: mpsc::UnboundedSender<WakeReason>,
    wake_rx: Mutex<Option<mpsc::UnboundedReceiver<WakeReason>>>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: Mutex<Option<mpsc::UnboundedReceiver<Completion>>>,
}

impl<C: Clock + 'static> Runner<C> {
    pub fn new(ctx: ExecutionContext<C>) -> Arc<Self> {
        let (wake_tx, wake_rx) = mpsc::unbounded_channel();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let queues = QueueSet::new(&ctx.config);
        Arc::new(Self {
            ctx,
            queues,
            graph: Mutex::new(DependencyGraph::new()),
            inflight: Mutex::new(HashMap::new()),
            suspended: AtomicBool::new(false),
            root_cancel: CancellationToken::new(),
            wake_tx,
            wake_rx: Mutex::new(Some(wake_rx)),
            completion_tx,
            completion_rx: Mutex::new(Some(completion_rx)),
        })
    }

    /// Notify the Runner that something changed. Non-blocking; safe to
    /// call from any task.
    pub fn wake(&self, reason: WakeReason) {
        let _ = self.wake_tx.send(reason);
    }

    /// `cancel(id)`: signal cooperative cancellation if `id` is
    /// `running`, otherwise delete it outright (it has no work in
    /// flight to cancel).
    pub fn cancel(&self, id: JobId) -> Result<(), RunnerError> {
        if let Some(cancel) = self.inflight.lock().get(&id).cloned() {
            cancel.cancel();
            return Ok(());
        }
        match self.ctx.store.fetch_one(id)? {
            Some(job) if !job.is_terminal() => {
                self.ctx.store.delete(id)?;
                self.graph.lock().forget_waiter(id);
                Ok(())
            }
            Some(_) => Ok(()),
            None => Err(RunnerError::NotFound(id)),
        }
    }

    /// `cancelAll(variant?)`: signal every running job (optionally
    /// scoped to one variant) and delete every non-running, non-terminal
    /// row of that scope. Dispatched through the wake channel so it runs
    /// on the Runner task alongside every other state mutation.
    pub fn cancel_all(&self, variant: Option<Variant>) {
        self.wake(WakeReason::CancelAll(variant));
    }

    /// `suspend()`: stop starting new executions. Jobs already
    /// `running` continue until they complete or are cooperatively
    /// cancelled.
    pub fn suspend(&self) {
        self.suspended.store(true, Ordering::SeqCst);
    }

    /// `resume()`: allow admission again and re-evaluate the
    /// queues immediately rather than waiting for the next tick.
    pub fn resume(&self) {
        self.suspended.store(false, Ordering::SeqCst);
        self.wake(WakeReason::Tick);
    }

    /// `appBecameActive`: release every `recurringOnActive`
    /// variant — ensure its singleton row exists and, if it was parked
    /// at `nextRunTimestamp = u64::MAX` awaiting this transition, make
    /// it due now.
    pub fn app_became_active(&self) -> Result<(), RunnerError> {
        let now_ms = self.ctx.clock.epoch_ms();
        for variant in Variant::ALL {
            let spec = variant.spec();
            if spec.default_behaviour != Behaviour::RecurringOnActive {
                continue;
            }
            self.ensure_singleton(variant, spec.default_behaviour, now_ms)?;
            self.release_parked(variant, now_ms)?;
        }
        self.wake(WakeReason::AppBecameActive);
        Ok(())
    }

    /// `appBecameInactive`: no state change of its own beyond
    /// recording the wake; admission otherwise continues as normal
    /// (backgrounding new-execution suppression is `suspend()`'s job,
    /// a distinct axis from the active/inactive release signal).
    pub fn app_became_inactive(&self) {
        self.wake(WakeReason::AppBecameInactive);
    }

    /// Crash recovery plus startup enqueue: mark stuck `running` rows
    /// `runnable`, rebuild the in-memory
    /// dependency graph from the store's persisted edges, and ensure
    /// every `recurring`/`recurringOnLaunch`/run-once-after-launch
    /// singleton has a live row.
    fn startup(&self) -> Result<(), RunnerError> {
        let now_ms = self.ctx.clock.epoch_ms();
        let recovered = self.ctx.store.mark_all_running_as_runnable(now_ms)?;
        if recovered > 0 {
            tracing::warn!(recovered, "runner startup: recovered rows stuck in running");
        }
        self.rebuild_dependency_graph()?;
        self.ensure_startup_singletons(now_ms)?;
        Ok(())
    }

    fn rebuild_dependency_graph(&self) -> Result<(), RunnerError> {
        let waiters = self.ctx.store.fetch_by_filter(&JobFilter::new().with_status(Status::PendingDependencies))?;
        let mut graph = DependencyGraph::new();
        for waiter in &waiters {
            for edge in self.ctx.store.fetch_dependencies(waiter.id)? {
                graph.add_edge(edge);
            }
        }
        *self.graph.lock() = graph;
        Ok(())
    }

    /// `recurring`/`recurringOnLaunch`/run-once-after-launch variants get
    /// a row at startup with no external trigger needed;
    /// `recurringOnActive` is excluded — it is released specifically by
    /// [`Self::app_became_active`], not plain process launch.
    fn ensure_startup_singletons(&self, now_ms: u64) -> Result<(), RunnerError> {
        for variant in Variant::ALL {
            let spec = variant.spec();
            let auto_starts = matches!(
                spec.default_behaviour,
                Behaviour::Recurring | Behaviour::RecurringOnLaunch | Behaviour::RunOnceAfterLaunch
            );
            if !auto_starts || spec.concurrency != ConcurrencyPolicy::SingleInstance {
                continue;
            }
            self.ensure_singleton(variant, spec.default_behaviour, now_ms)?;
        }
        Ok(())
    }

    fn ensure_singleton(&self, variant: Variant, behaviour: Behaviour, now_ms: u64) -> Result<(), RunnerError> {
        let existing = self.ctx.store.fetch_by_filter(&JobFilter::new().with_variant(variant))?;
        if existing.iter().any(|job| !job.is_terminal()) {
            return Ok(());
        }
        let job = Job::new(variant, behaviour, false, None, None, JobDetails::empty(), now_ms)?;
        self.ctx.store.insert(job)?;
        Ok(())
    }

    fn release_parked(&self, variant: Variant, now_ms: u64) -> Result<(), RunnerError> {
        let rows = self
            .ctx
            .store
            .fetch_by_filter(&JobFilter::new().with_variant(variant).with_status(Status::Runnable))?;
        for mut job in rows {
            if job.next_run_timestamp == u64::MAX {
                job.next_run_timestamp = now_ms / 1000;
                self.ctx.store.update(job)?;
            }
        }
        Ok(())
    }

    /// The Runner task body. Runs until every `wake` sender (including
    /// this Runner's own) is dropped.
    pub async fn run(self: Arc<Self>) -> Result<(), RunnerError> {
        self.startup()?;

        let mut wake_rx = self.wake_rx.lock().take().ok_or(RunnerError::AlreadyRunning)?;
        let mut completion_rx = self.completion_rx.lock().take().ok_or(RunnerError::AlreadyRunning)?;

        self.fill_queues()?;

        loop {
            let delay = self.next_deadline()?.map(|at_secs| {
                let now_secs = self.ctx.now_epoch_secs();
                Duration::from_secs(at_secs.saturating_sub(now_secs))
            });
            let sleep = tokio::time::sleep(delay.unwrap_or(Duration::from_secs(3600)));
            tokio::pin!(sleep);

            tokio::select! {
                reason = wake_rx.recv() => {
                    match reason {
                        Some(WakeReason::CancelAll(variant)) => self.handle_cancel_all(variant)?,
                        Some(_) => {}
                        None => return Ok(()),
                    }
                    self.fill_queues()?;
                }
                Some(completion) = completion_rx.recv() => {
                    self.handle_completion(completion)?;
                    self.fill_queues()?;
                }
                _ = &mut sleep => {
                    self.fill_queues()?;
                }
            }
        }
    }

    /// For each variant's queue, select candidates where `status =
    /// runnable ∧ nextRunTimestamp ≤ now ∧ dependencies empty`, ordered
    /// `(nextRunTimestamp, id)` (already guaranteed by
    /// `JobStore::fetch_runnable`'s sort), admitted until the variant's
    /// concurrency cap is filled.
    fn fill_queues(&self) -> Result<(), RunnerError> {
        if self.suspended.load(Ordering::SeqCst) {
            return Ok(());
        }

        let now_secs = self.ctx.now_epoch_secs();
        let candidates = self.ctx.store.fetch_runnable(now_secs)?;

        let mut admitted = 0usize;
        let mut deferred_for_capacity = 0usize;
        for job in candidates {
            if self.graph.lock().is_blocked(job.id) {
                continue;
            }
            match self.queues.try_admit(job.variant, job.thread_id) {
                Some(guard) => {
                    self.admit(job, guard)?;
                    admitted += 1;
                }
                None => deferred_for_capacity += 1,
            }
        }
        tracing::debug!(admitted, deferred_for_capacity, "runner tick");
        Ok(())
    }

    /// Transition `runnable → running` atomically and spawn an execution
    /// task bound to a child of the Runner's root cancellation token.
    fn admit(&self, mut job: Job, guard: AdmissionGuard) -> Result<(), RunnerError> {
        job.status = Status::Running;
        job.updated_at_epoch_ms = self.ctx.clock.epoch_ms();
        self.ctx.store.update(job.clone())?;

        let cancel = self.root_cancel.child_token();
        self.inflight.lock().insert(job.id, cancel.clone());

        let ctx = self.ctx.clone();
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let _guard = guard;
            let result = registry::execute(&job, &ctx, &cancel).await;
            let _ = completion_tx.send(Completion { job, result });
        });
        Ok(())
    }

    /// Apply the outcome policy in a single write and fire dependency
    /// wake-ups for whatever just resolved.
    fn handle_completion(&self, completion: Completion) -> Result<(), RunnerError> {
        let Completion { job, result } = completion;
        self.inflight.lock().remove(&job.id);

        let job_id = job.id;
        let variant = job.variant;
        let outcome_label = if result.is_ok() { "success" } else { "error" };
        if let Err(err) = &result {
            tracing::warn!(job_id = %job_id, %variant, error = %err, "job execution failed");
        }

        let now_ms = self.ctx.clock.epoch_ms();
        match outcome::resolve(job, result, &self.ctx.config, now_ms) {
            Resolution::Persist(updated) => {
                tracing::info!(job_id = %job_id, %variant, outcome = outcome_label, status = %updated.status, "job run complete");
                self.ctx.store.update(updated)?;
            }
            Resolution::PersistAndResolve(updated) => {
                tracing::info!(job_id = %job_id, %variant, outcome = outcome_label, status = %updated.status, "job run complete, dependents released");
                self.ctx.store.update(updated)?;
                self.wake_dependents(job_id, BlockerOutcome::Resolved)?;
            }
            Resolution::Delete(blocker_outcome) => {
                tracing::info!(job_id = %job_id, %variant, outcome = outcome_label, "job terminal, row removed");
                self.ctx.store.delete(job_id)?;
                self.wake_dependents(job_id, blocker_outcome)?;
            }
        }
        Ok(())
    }

    /// A blocker reached a terminal state: resolve the dependency graph
    /// and apply each waiter's reaction.
    fn wake_dependents(&self, blocker: JobId, outcome: BlockerOutcome) -> Result<(), RunnerError> {
        let permanently_failed = matches!(outcome, BlockerOutcome::PermanentlyFailed);
        let wakeups = self.graph.lock().resolve_blocker(blocker, permanently_failed);
        for (waiter, action) in wakeups {
            match action {
                WakeAction::StillBlocked => {}
                WakeAction::Unblocked => {
                    if let Some(mut waiter_job) = self.ctx.store.fetch_one(waiter)? {
                        waiter_job.status = Status::Runnable;
                        self.ctx.store.update(waiter_job)?;
                    }
                    self.graph.lock().forget_waiter(waiter);
                }
                WakeAction::CascadeFailure => {
                    if self.ctx.store.fetch_one(waiter)?.is_some() {
                        self.ctx.store.delete(waiter)?;
                        self.wake_dependents(waiter, BlockerOutcome::PermanentlyFailed)?;
                    }
                    self.graph.lock().forget_waiter(waiter);
                }
            }
        }
        Ok(())
    }

    fn handle_cancel_all(&self, variant: Option<Variant>) -> Result<(), RunnerError> {
        let running: Vec<(JobId, CancellationToken)> =
            self.inflight.lock().iter().map(|(id, token)| (*id, token.clone())).collect();
        for (job_id, cancel) in running {
            let in_scope = match variant {
                Some(v) => self.ctx.store.fetch_one(job_id)?.is_some_and(|job| job.variant == v),
                None => true,
            };
            if in_scope {
                cancel.cancel();
            }
        }

        let mut filter = JobFilter::new();
        if let Some(v) = variant {
            filter = filter.with_variant(v);
        }
        for job in self.ctx.store.fetch_by_filter(&filter)? {
            if job.status != Status::Running && !job.is_terminal() {
                self.ctx.store.delete(job.id)?;
                self.graph.lock().forget_waiter(job.id);
            }
        }
        Ok(())
    }

    /// The earliest `nextRunTimestamp` among non-terminal rows not yet
    /// due, or `None` if nothing is scheduled ahead. Queried against the
    /// store's own `(nextRunTimestamp, id)` ordering rather than a
    /// separately maintained heap — the store already sorts every fetch
    /// that way, so a second index would only duplicate it.
    fn next_deadline(&self) -> Result<Option<u64>, RunnerError> {
        let runnable = self.ctx.store.fetch_by_filter(&JobFilter::new().with_status(Status::Runnable))?;
        let deferred = self.ctx.store.fetch_by_filter(&JobFilter::new().with_status(Status::Deferred))?;
        Ok(runnable
            .iter()
            .chain(deferred.iter())
            .map(|job| job.next_run_timestamp)
            .filter(|ts| *ts != u64::MAX)
            .min())
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
