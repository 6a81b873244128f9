// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Query filters for `JobStore::fetch_by_filter`.

use jobkit_core::{JobId, Status, ThreadId, Variant};

/// Selects a subset of jobs by their indexed fields. Every field is an
/// "and" constraint; `None` means "don't filter on this".
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub variant: Option<Variant>,
    pub thread_id: Option<ThreadId>,
    pub status: Option<Status>,
    pub exclude_ids: Vec<JobId>,
}

impl JobFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn with_thread_id(mut self, thread_id: ThreadId) -> Self {
        self.thread_id = Some(thread_id);
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn excluding(mut self, id: JobId) -> Self {
        self.exclude_ids.push(id);
        self
    }

    pub(crate) fn matches(&self, job: &jobkit_core::Job) -> bool {
        if let Some(variant) = self.variant {
            if job.variant != variant {
                return false;
            }
        }
        if let Some(status) = self.status {
            if job.status != status {
                return false;
            }
        }
        if let Some(thread_id) = &self.thread_id {
            if job.thread_id.as_ref() != Some(thread_id) {
                return false;
            }
        }
        if self.exclude_ids.contains(&job.id) {
            return false;
        }
        true
    }
}
