// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashMap;

crate::define_id! {
    /// Test ID type for macro verification.
    pub struct TestId("tst-");
}

#[test]
fn define_id_hash_map_lookup() {
    let mut map = HashMap::new();
    let id = TestId::new();
    map.insert(id, 42);
    assert_eq!(map.get(&id), Some(&42));
}

#[test]
fn define_id_has_prefix() {
    let id = TestId::new();
    assert!(id.as_str().starts_with("tst-"));
}

#[test]
fn define_id_suffix_strips_prefix() {
    let id = TestId::from_string("tst-abcdefgh");
    assert_eq!(id.suffix(), "abcdefgh");
}

#[test]
fn define_id_short_truncates_suffix() {
    let id = TestId::from_string("tst-abcdefghijklmnop");
    assert_eq!(id.short(4), "abcd");
}

#[test]
fn define_id_short_returns_full_when_shorter() {
    let id = TestId::from_string("tst-abc");
    assert_eq!(id.short(8), "abc");
}

#[test]
fn define_id_from_str_round_trips() {
    let id: TestId = "tst-fixed-id".into();
    assert_eq!(id.as_str(), "tst-fixed-id");
}

#[test]
fn define_id_display_matches_as_str() {
    let id = TestId::new();
    assert_eq!(id.to_string(), id.as_str());
}

#[test]
fn define_id_serde_round_trip() {
    let id = TestId::from_string("tst-serde-me");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"tst-serde-me\"");
    let parsed: TestId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn define_id_two_random_ids_differ() {
    assert_ne!(TestId::new(), TestId::new());
}

#[test]
fn idbuf_borrow_str_matches_hashmap_lookup() {
    let mut map: HashMap<IdBuf, u32> = HashMap::new();
    map.insert(IdBuf::new("abc"), 1);
    assert_eq!(map.get("abc"), Some(&1));
}

#[test]
fn short_truncates_plain_str() {
    assert_eq!(short("abcdefgh", 3), "abc");
    assert_eq!(short("ab", 3), "ab");
}
