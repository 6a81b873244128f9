// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The explicit context threaded through every executor invocation, in
//! place of a process-wide service locator: a `Context` value carrying
//! handles to the Store, Network, Crypto, File system, Clock, Config
//! cache, and EventSink.
//!
//! `Clock` stays a generic parameter rather than a trait object: its
//! `Clone` supertrait makes it non-object-safe (`Clone::clone` returns
//! `Self`). Every other collaborator is a heavier, genuinely
//! polymorphic I/O boundary, so it is held as `Arc<dyn Trait>` to avoid a
//! combinatorial blow-up of generic parameters on `Runner` and every
//! executor function — the same mixed pattern the teacher's own
//! `Executor<A, N, C: Clock>` (generic adapters plus one `Arc<dyn
//! WorkspaceAdapter>` field) uses.

use jobkit_adapters::{
    AttachmentRepository, CommunityPoller, ConfigStore, CryptoProvider, EventSink,
    FileSystemClient, InteractionRepository, NetworkClient,
};
use jobkit_core::{Clock, EngineConfig};
use jobkit_storage::JobStore;
use std::sync::Arc;

/// Bundles every external collaborator an executor may call, plus the
/// clock and tunable configuration. Cheap to clone: every field is either
/// `Arc` or (for `Clock`) itself designed to be cheaply cloneable.
pub struct ExecutionContext<C: Clock> {
    pub store: Arc<dyn JobStore>,
    pub network: Arc<dyn NetworkClient>,
    pub crypto: Arc<dyn CryptoProvider>,
    pub file_system: Arc<dyn FileSystemClient>,
    pub attachments: Arc<dyn AttachmentRepository>,
    pub interactions: Arc<dyn InteractionRepository>,
    pub community: Arc<dyn CommunityPoller>,
    pub config_store: Arc<dyn ConfigStore>,
    pub event_sink: Arc<dyn EventSink>,
    pub clock: C,
    pub config: Arc<EngineConfig>,
}

impl<C: Clock> Clone for ExecutionContext<C> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            network: self.network.clone(),
            crypto: self.crypto.clone(),
            file_system: self.file_system.clone(),
            attachments: self.attachments.clone(),
            interactions: self.interactions.clone(),
            community: self.community.clone(),
            config_store: self.config_store.clone(),
            event_sink: self.event_sink.clone(),
            clock: self.clock.clone(),
            config: self.config.clone(),
        }
    }
}

impl<C: Clock> ExecutionContext<C> {
    pub fn now_epoch_secs(&self) -> u64 {
        self.clock.epoch_ms() / 1000
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use super::ExecutionContext;
    use jobkit_adapters::fakes::{
        FakeAttachmentRepository, FakeCommunityPoller, FakeConfigStore, FakeCryptoProvider,
        FakeEventSink, FakeFileSystem, FakeInteractionRepository, FakeNetworkClient,
    };
    use jobkit_core::{EngineConfig, FakeClock};
    use jobkit_storage::WalJobStore;
    use std::sync::Arc;

    /// Handles to every fake collaborator, kept alongside the context so
    /// tests can assert on their recorded state after running an executor.
    pub struct FakeHarness {
        pub ctx: ExecutionContext<FakeClock>,
        pub store: Arc<WalJobStore>,
        pub network: Arc<FakeNetworkClient>,
        pub crypto: Arc<FakeCryptoProvider>,
        pub file_system: Arc<FakeFileSystem>,
        pub attachments: Arc<FakeAttachmentRepository>,
        pub interactions: Arc<FakeInteractionRepository>,
        pub community: Arc<FakeCommunityPoller>,
        pub config_store: Arc<FakeConfigStore>,
        pub event_sink: Arc<FakeEventSink>,
        pub clock: FakeClock,
    }

    impl FakeHarness {
        pub fn new() -> Self {
            let store = Arc::new(WalJobStore::in_memory());
            let network = Arc::new(FakeNetworkClient::new());
            let crypto = Arc::new(FakeCryptoProvider::new());
            let file_system = Arc::new(FakeFileSystem::new());
            let attachments = Arc::new(FakeAttachmentRepository::new());
            let interactions = Arc::new(FakeInteractionRepository::new());
            let community = Arc::new(FakeCommunityPoller::new());
            let config_store = Arc::new(FakeConfigStore::new());
            let event_sink = Arc::new(FakeEventSink::new());
            let clock = FakeClock::new();
            let ctx = ExecutionContext {
                store: store.clone(),
                network: network.clone(),
                crypto: crypto.clone(),
                file_system: file_system.clone(),
                attachments: attachments.clone(),
                interactions: interactions.clone(),
                community: community.clone(),
                config_store: config_store.clone(),
                event_sink: event_sink.clone(),
                clock: clock.clone(),
                config: Arc::new(EngineConfig::default()),
            };
            Self {
                ctx,
                store,
                network,
                crypto,
                file_system,
                attachments,
                interactions,
                community,
                config_store,
                event_sink,
                clock,
            }
        }
    }

    impl Default for FakeHarness {
        fn default() -> Self {
            Self::new()
        }
    }
}
