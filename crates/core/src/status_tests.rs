// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    pending_dependencies = { Status::PendingDependencies, false },
    runnable              = { Status::Runnable,            false },
    running               = { Status::Running,             false },
    succeeded             = { Status::Succeeded,            true },
    permanently_failed    = { Status::PermanentlyFailed,    true },
    deferred              = { Status::Deferred,             false },
)]
fn is_terminal_matches_table(status: Status, expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[yare::parameterized(
    pending_dependencies = { Status::PendingDependencies, false },
    runnable              = { Status::Runnable,            true },
    running               = { Status::Running,             false },
    succeeded             = { Status::Succeeded,            false },
    permanently_failed    = { Status::PermanentlyFailed,    false },
    deferred              = { Status::Deferred,             true },
)]
fn is_admissible_matches_table(status: Status, expected: bool) {
    assert_eq!(status.is_admissible(), expected);
}

#[test]
fn display_matches_wire_names() {
    assert_eq!(Status::PendingDependencies.to_string(), "pendingDependencies");
    assert_eq!(Status::PermanentlyFailed.to_string(), "permanentlyFailed");
}

#[test]
fn serde_round_trip() {
    let json = serde_json::to_string(&Status::Runnable).unwrap();
    assert_eq!(json, "\"runnable\"");
    let parsed: Status = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, Status::Runnable);
}
