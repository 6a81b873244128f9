// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn identical_bytes_hash_identically() {
    let a = JobDetails::new(b"same".to_vec());
    let b = JobDetails::new(b"same".to_vec());
    assert_eq!(a.hash(), b.hash());
}

#[test]
fn different_bytes_hash_differently() {
    let a = JobDetails::new(b"one".to_vec());
    let b = JobDetails::new(b"two".to_vec());
    assert_ne!(a.hash(), b.hash());
}

#[test]
fn hash_is_fixed_length_hex() {
    let details = JobDetails::new(b"attachment-id=42".to_vec());
    assert_eq!(details.hash().len(), 32);
    assert!(details.hash().chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn empty_has_deterministic_hash() {
    assert_eq!(JobDetails::empty().hash(), JobDetails::new(Vec::new()).hash());
}

#[test]
fn bytes_returns_original_payload() {
    let details = JobDetails::new(b"payload".to_vec());
    assert_eq!(details.bytes(), b"payload");
}

#[test]
fn serde_round_trip_preserves_bytes_and_hash() {
    let details = JobDetails::new(vec![1, 2, 3, 4]);
    let json = serde_json::to_string(&details).unwrap();
    let restored: JobDetails = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, details);
}
