// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn passes_when_not_cancelled() {
    let token = CancellationToken::new();
    assert!(check(&token).is_ok());
}

#[test]
fn raises_cancelled_after_trigger() {
    let token = CancellationToken::new();
    token.cancel();
    assert_eq!(check(&token).unwrap_err(), JobError::Cancelled);
}

#[test]
fn child_token_observes_parent_cancellation() {
    let parent = CancellationToken::new();
    let child = parent.child_token();
    parent.cancel();
    assert_eq!(check(&child).unwrap_err(), JobError::Cancelled);
}
