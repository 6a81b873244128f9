// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobkit-adapters: the external collaborator interfaces the job engine
//! treats as out of scope — network, crypto, file system,
//! attachment/interaction rows, the community poller, the remote-synced
//! config store, and event sinks — plus in-memory fakes behind
//! `test-support` for exercising the engine's executors without real
//! infrastructure.

pub mod attachments;
pub mod community;
pub mod config_store;
pub mod crypto;
pub mod event_sink;
pub mod file_system;
pub mod interactions;
pub mod network;

#[cfg(any(test, feature = "test-support"))]
pub mod fakes;

pub use attachments::{AttachmentError, AttachmentRepository, AttachmentRow, AttachmentState};
pub use community::{CommunityError, CommunityPoller, OpenGroupRoom};
pub use config_store::{ConfigStore, ConfigStoreError};
pub use crypto::{CryptoError, CryptoProvider};
pub use event_sink::{EventSink, ExecutorEvent};
pub use file_system::{FileSystemClient, FsError};
pub use interactions::{InteractionError, InteractionRepository};
pub use network::{
    BatchRequest, BatchResponse, ExpiryEntry, NetworkClient, NetworkError, PreparedRequest,
    UploadResponse,
};
