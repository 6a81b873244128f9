// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobkit-storage: the durable, event-sourced job record store.
//! Everything here is infrastructure for the engine's view of "what
//! jobs exist and what do they depend on"; scheduling policy itself lives
//! in `jobkit-engine`.

pub mod error;
pub mod events;
pub mod filter;
pub mod state;
pub mod store;
pub mod wal;

pub use error::StoreError;
pub use events::StoreEvent;
pub use filter::JobFilter;
pub use state::JobTable;
pub use store::{JobStore, Transaction, WalJobStore};
pub use wal::Wal;
