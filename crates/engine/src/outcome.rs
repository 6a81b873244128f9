// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The outcome policy: the single place an executor's return value
//! becomes a job-row state transition. Executors never retry in-process;
//! they return the outcome to the Runner, which is the single source of
//! retry policy.

use crate::registry::Outcome;
use jobkit_core::{Behaviour, Classification, EngineConfig, Job, Status, SuccessAction};

/// How this job's dependents should react once the row leaves `running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockerOutcome {
    /// Success or `AlreadyComplete`: waiters with a resolved blocker
    /// become runnable (subject to their other blockers).
    Resolved,
    /// Permanent failure: waiters also permanently fail unless their edge
    /// carries `continueOnBlockerFailure`.
    PermanentlyFailed,
}

/// What the Runner must do with the job row after applying the policy.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Delete(BlockerOutcome),
    /// Row stays, but this run's attempt is finished and wasn't the job's
    /// last: a recurring/parked behaviour rescheduled after a genuine
    /// success. A waiter may depend on the currently-running instance of
    /// a recurring blocker, so this needs a wake here too, not just on
    /// deletion.
    PersistAndResolve(Job),
    /// Row stays and the same attempt continues (deferred, cancelled, or a
    /// transient failure still inside its budget): dependents keep waiting.
    Persist(Job),
}

/// Apply the outcome policy to a completed job. `now_epoch_ms`/
/// `now_epoch_secs` must come from the same clock reading the Runner
/// used to dequeue `job`.
pub fn resolve(
    mut job: Job,
    result: Result<Outcome, jobkit_core::JobError>,
    config: &EngineConfig,
    now_epoch_ms: u64,
) -> Resolution {
    let now_epoch_secs = now_epoch_ms / 1000;
    match result {
        Ok(Outcome::Success { stop, next_run_override, details }) => {
            if let Some(details) = details {
                job.details = details;
            }
            match job.apply_success(stop, now_epoch_ms) {
                SuccessAction::Delete => Resolution::Delete(BlockerOutcome::Resolved),
                SuccessAction::Reschedule => {
                    match next_run_after_success(job.behaviour, next_run_override, now_epoch_secs) {
                        Some(next_run_timestamp) => {
                            job.status = Status::Runnable;
                            job.next_run_timestamp = next_run_timestamp;
                            Resolution::PersistAndResolve(job)
                        }
                        None => Resolution::Delete(BlockerOutcome::Resolved),
                    }
                }
            }
        }
        Ok(Outcome::Deferred { next_run_timestamp, details }) => {
            if let Some(details) = details {
                job.details = details;
            }
            job.apply_deferred(now_epoch_secs, config.min_defer_backoff_secs, next_run_timestamp);
            Resolution::Persist(job)
        }
        Err(err) => match job.classify(&err) {
            Classification::AlreadyComplete => Resolution::Delete(BlockerOutcome::Resolved),
            Classification::Cancelled => {
                job.status = Status::Runnable;
                Resolution::Persist(job)
            }
            Classification::Permanent => Resolution::Delete(BlockerOutcome::PermanentlyFailed),
            Classification::Transient => {
                if job.apply_transient_failure(&config.backoff, now_epoch_secs) {
                    Resolution::Delete(BlockerOutcome::PermanentlyFailed)
                } else {
                    Resolution::Persist(job)
                }
            }
        },
    }
}

/// Next scheduled run after a non-stop success, or `None` to delete the
/// row (`runOnce` deletes, every other behaviour sets its next run).
///
/// `recurringOnActive`/`recurringOnLaunch` jobs are parked at
/// `u64::MAX` rather than rescheduled by timestamp: they are released by
/// the Runner's lifecycle handling (on `appBecameActive`, or at next
/// process startup) rather than the tick heap.
fn next_run_after_success(
    behaviour: Behaviour,
    next_run_override: Option<u64>,
    now_epoch_secs: u64,
) -> Option<u64> {
    match behaviour {
        Behaviour::RunOnce | Behaviour::RunOnceAfter(_) | Behaviour::RunOnceAfterLaunch => None,
        Behaviour::Recurring => Some(next_run_override.unwrap_or(now_epoch_secs)),
        Behaviour::RecurringOnActive | Behaviour::RecurringOnLaunch => {
            Some(next_run_override.unwrap_or(u64::MAX))
        }
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
