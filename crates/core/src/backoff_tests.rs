// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn backoff() -> Backoff {
    Backoff::new(Duration::from_secs(2), Duration::from_secs(100))
}

#[yare::parameterized(
    first  = { 1, 2 },
    second = { 2, 4 },
    third  = { 3, 8 },
    fourth = { 4, 16 },
)]
fn grows_exponentially_before_cap(failure_count: u32, expected_secs: u64) {
    assert_eq!(backoff().delay_for(failure_count), Duration::from_secs(expected_secs));
}

#[test]
fn caps_at_max() {
    let b = backoff();
    assert_eq!(b.delay_for(20), b.max);
}

#[test]
fn never_exceeds_max_even_with_huge_failure_count() {
    let b = backoff();
    assert_eq!(b.delay_for(u32::MAX), b.max);
}

#[test]
fn default_base_is_one_second() {
    assert_eq!(Backoff::default().delay_for(1), Duration::from_secs(1));
}
