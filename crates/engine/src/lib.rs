// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobkit-engine: the job engine itself — executor registry, variant
//! table, Queue Set, Dependency Graph, Runner, Outcome Policy,
//! cancellation/lifecycle, garbage collection, and the thirteen job
//! variant executors.

pub mod cancellation;
pub mod context;
pub mod dependency_graph;
pub mod enqueue;
pub mod error;
pub mod executors;
pub mod outcome;
pub mod queue;
pub mod registry;
pub mod runner;

pub use context::ExecutionContext;
pub use dependency_graph::{DependencyGraph, WakeAction};
pub use enqueue::enqueue;
pub use error::RunnerError;
pub use outcome::{resolve, BlockerOutcome, Resolution};
pub use queue::{AdmissionGuard, QueueSet};
pub use registry::Outcome;
pub use runner::{Runner, WakeReason};

#[cfg(any(test, feature = "test-support"))]
pub use context::test_support::FakeHarness;
