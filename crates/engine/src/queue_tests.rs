// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jobkit_core::Variant;

#[test]
fn single_instance_admits_one_at_a_time() {
    let set = QueueSet::new(&EngineConfig::default());
    let first = set.try_admit(Variant::GarbageCollection, None);
    assert!(first.is_some());
    assert!(set.try_admit(Variant::GarbageCollection, None).is_none());
    drop(first);
    assert!(set.try_admit(Variant::GarbageCollection, None).is_some());
}

#[test]
fn parallel_bounded_admits_up_to_the_cap() {
    let set = QueueSet::new(&EngineConfig::default());
    let guards: Vec<_> =
        (0..4).map(|_| set.try_admit(Variant::AttachmentDownload, None)).collect();
    assert!(guards.iter().all(Option::is_some));
    assert!(set.try_admit(Variant::AttachmentDownload, None).is_none());
}

#[test]
fn serial_per_thread_blocks_same_thread_but_not_others() {
    let set = QueueSet::new(&EngineConfig::default());
    let t1 = jobkit_core::ThreadId::new();
    let t2 = jobkit_core::ThreadId::new();
    let first = set.try_admit(Variant::MessageSend, Some(t1));
    assert!(first.is_some());
    assert!(set.try_admit(Variant::MessageSend, Some(t1)).is_none());
    assert!(set.try_admit(Variant::MessageSend, Some(t2)).is_some());
}

#[test]
fn concurrency_override_widens_the_cap() {
    let config = EngineConfig::default().with_concurrency_override(Variant::AttachmentDownload, 1);
    let set = QueueSet::new(&config);
    let first = set.try_admit(Variant::AttachmentDownload, None);
    assert!(first.is_some());
    assert!(set.try_admit(Variant::AttachmentDownload, None).is_none());
}

#[test]
fn dropping_a_per_thread_guard_frees_the_thread() {
    let set = QueueSet::new(&EngineConfig::default());
    let t1 = jobkit_core::ThreadId::new();
    let guard = set.try_admit(Variant::GroupLeaving, Some(t1)).expect("admits first");
    drop(guard);
    assert!(set.try_admit(Variant::GroupLeaving, Some(t1)).is_some());
}
