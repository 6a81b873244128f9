// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine-wide configuration, constructed by the embedder.
//!
//! The job engine is a library: it never reads a config file itself (that
//! remains the concern of the external, remote-synced config store the
//! rest of the messenger already owns). `EngineConfig` is just the typed
//! bag of knobs an embedder passes in at construction time.

use crate::backoff::Backoff;
use crate::variant::Variant;
use std::collections::HashMap;

/// Tunables for the runner and outcome policy.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Exponential backoff curve applied to transient failures.
    pub backoff: Backoff,
    /// Minimum delay applied to a `Deferred` outcome before retry.
    pub min_defer_backoff_secs: u64,
    /// Per-variant concurrency overrides; falls back to `Variant::spec()`
    /// when absent. Lets an embedder tune `ParallelBounded` caps without
    /// recompiling (e.g. a low-memory client shrinking attachment
    /// concurrency from 4 to 1).
    pub concurrency_overrides: HashMap<Variant, usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backoff: Backoff::default(),
            min_defer_backoff_secs: 1,
            concurrency_overrides: HashMap::new(),
        }
    }
}

impl EngineConfig {
    pub fn with_concurrency_override(mut self, variant: Variant, limit: usize) -> Self {
        self.concurrency_overrides.insert(variant, limit);
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
