// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The durable job record and its identifiers.

use crate::details::JobDetails;
use crate::error::JobError;
use crate::status::Status;
use crate::variant::{Behaviour, Variant};
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Stable identifier assigned on first persistence of a job row.
    pub struct JobId("job-");
}

crate::define_id! {
    /// Identifies the conversation a job operates on.
    pub struct ThreadId("thr-");
}

crate::define_id! {
    /// Identifies a single message-level record a job operates on.
    pub struct InteractionId("int-");
}

/// Raised at enqueue time when a job's optional fields don't satisfy its
/// variant's requirements (invariant I1).
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum EnqueueError {
    #[error("variant {variant} requires a thread id")]
    MissingThreadId { variant: Variant },
    #[error("variant {variant} requires an interaction id")]
    MissingInteractionId { variant: Variant },
}

/// A durable job record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub variant: Variant,
    pub behaviour: Behaviour,
    pub should_be_unique: bool,
    pub thread_id: Option<ThreadId>,
    pub interaction_id: Option<InteractionId>,
    pub details: JobDetails,
    pub failure_count: u32,
    /// Seconds since epoch; 0 means "as soon as possible".
    pub next_run_timestamp: u64,
    pub status: Status,
    pub created_at_epoch_ms: u64,
    pub updated_at_epoch_ms: u64,
}

impl Job {
    /// Construct a new job for first enqueue, validating invariant I1
    /// against the variant's static requirements.
    pub fn new(
        variant: Variant,
        behaviour: Behaviour,
        should_be_unique: bool,
        thread_id: Option<ThreadId>,
        interaction_id: Option<InteractionId>,
        details: JobDetails,
        now_epoch_ms: u64,
    ) -> Result<Self, EnqueueError> {
        let spec = variant.spec();
        if spec.requires_thread_id && thread_id.is_none() {
            return Err(EnqueueError::MissingThreadId { variant });
        }
        if spec.requires_interaction_id && interaction_id.is_none() {
            return Err(EnqueueError::MissingInteractionId { variant });
        }
        Ok(Self {
            id: JobId::new(),
            variant,
            behaviour,
            should_be_unique,
            thread_id,
            interaction_id,
            details,
            failure_count: 0,
            next_run_timestamp: 0,
            status: Status::Runnable,
            created_at_epoch_ms: now_epoch_ms,
            updated_at_epoch_ms: now_epoch_ms,
        })
    }

    /// The `(variant, thread_id, details_hash)` key used to detect a
    /// conflicting `shouldBeUnique` row (invariant I3).
    pub fn uniqueness_key(&self) -> Option<(Variant, Option<ThreadId>, String)> {
        self.should_be_unique
            .then(|| (self.variant, self.thread_id, self.details.hash().to_string()))
    }

    /// True once the job's failure budget is exhausted by count alone
    /// (`failure_count` exceeds `max_failure_count`, where a bounded budget
    /// applies).
    pub fn failure_budget_exhausted(&self) -> bool {
        self.variant.spec().max_failure_count.exceeded(self.failure_count)
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Apply a successful execution. `stop` removes the job from rotation
    /// even for recurring behaviours.
    pub fn apply_success(&mut self, stop: bool, now_epoch_ms: u64) -> SuccessAction {
        self.failure_count = 0;
        self.updated_at_epoch_ms = now_epoch_ms;
        if stop || matches!(self.behaviour, Behaviour::RunOnce) {
            return SuccessAction::Delete;
        }
        SuccessAction::Reschedule
    }

    /// Apply a `Deferred` outcome: return to `runnable`, failure count
    /// untouched, honoring whichever of `now + min_backoff` or the
    /// executor-requested timestamp is later.
    pub fn apply_deferred(&mut self, now_epoch_secs: u64, min_backoff_secs: u64, requested: u64) {
        self.status = Status::Deferred;
        self.next_run_timestamp = requested.max(now_epoch_secs.saturating_add(min_backoff_secs));
    }

    /// Apply a transient failure: increment failure count and compute the
    /// next backoff window. Returns whether the budget is now exhausted.
    pub fn apply_transient_failure(
        &mut self,
        backoff: &crate::backoff::Backoff,
        now_epoch_secs: u64,
    ) -> bool {
        self.failure_count += 1;
        if self.failure_budget_exhausted() {
            return true;
        }
        self.status = Status::Runnable;
        self.next_run_timestamp = now_epoch_secs + backoff.delay_for(self.failure_count).as_secs();
        false
    }

    /// Classify a returned error against this job's taxonomy rules.
    /// Callers still need `failure_budget_exhausted` to decide whether a
    /// `Transient` classification has in fact become permanent.
    pub fn classify(&self, err: &JobError) -> Classification {
        if err.is_already_complete() {
            return Classification::AlreadyComplete;
        }
        if err.is_cancelled() {
            return Classification::Cancelled;
        }
        if err.is_permanent() {
            return Classification::Permanent;
        }
        Classification::Transient
    }
}

/// Outcome of classifying a `JobError` against this job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    AlreadyComplete,
    Cancelled,
    Permanent,
    Transient,
}

/// What a successful outcome does to the job row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessAction {
    Delete,
    Reschedule,
}

#[cfg(any(test, feature = "test-support"))]
pub struct JobBuilder {
    variant: Variant,
    behaviour: Behaviour,
    should_be_unique: bool,
    thread_id: Option<ThreadId>,
    interaction_id: Option<InteractionId>,
    details: JobDetails,
    failure_count: u32,
    next_run_timestamp: u64,
    status: Status,
    created_at_epoch_ms: u64,
}

#[cfg(any(test, feature = "test-support"))]
impl JobBuilder {
    pub fn new(variant: Variant) -> Self {
        let behaviour = variant.spec().default_behaviour;
        Self {
            variant,
            behaviour,
            should_be_unique: false,
            thread_id: None,
            interaction_id: None,
            details: JobDetails::empty(),
            failure_count: 0,
            next_run_timestamp: 0,
            status: Status::Runnable,
            created_at_epoch_ms: 0,
        }
    }

    pub fn thread_id(mut self, id: ThreadId) -> Self {
        self.thread_id = Some(id);
        self
    }

    pub fn interaction_id(mut self, id: InteractionId) -> Self {
        self.interaction_id = Some(id);
        self
    }

    pub fn should_be_unique(mut self, value: bool) -> Self {
        self.should_be_unique = value;
        self
    }

    pub fn details(mut self, details: JobDetails) -> Self {
        self.details = details;
        self
    }

    pub fn failure_count(mut self, count: u32) -> Self {
        self.failure_count = count;
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn next_run_timestamp(mut self, ts: u64) -> Self {
        self.next_run_timestamp = ts;
        self
    }

    pub fn behaviour(mut self, behaviour: Behaviour) -> Self {
        self.behaviour = behaviour;
        self
    }

    pub fn build(self) -> Job {
        Job {
            id: JobId::new(),
            variant: self.variant,
            behaviour: self.behaviour,
            should_be_unique: self.should_be_unique,
            thread_id: self.thread_id,
            interaction_id: self.interaction_id,
            details: self.details,
            failure_count: self.failure_count,
            next_run_timestamp: self.next_run_timestamp,
            status: self.status,
            created_at_epoch_ms: self.created_at_epoch_ms,
            updated_at_epoch_ms: self.created_at_epoch_ms,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Job {
    pub fn builder(variant: Variant) -> JobBuilder {
        JobBuilder::new(variant)
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
