// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::path::PathBuf;

#[test]
fn test_vars_constants() {
    assert_eq!(vars::OUTBOX_STATE_DIR, "OUTBOX_STATE_DIR");
    assert_eq!(vars::OUTBOX_CONFIG, "OUTBOX_CONFIG");
    assert_eq!(vars::OUTBOX_DAEMON_BINARY, "OUTBOX_DAEMON_BINARY");
    assert_eq!(vars::XDG_STATE_HOME, "XDG_STATE_HOME");
    assert_eq!(vars::RUST_LOG, "RUST_LOG");
}

#[test]
fn test_daemon_binary_set_and_unset() {
    std::env::set_var(vars::OUTBOX_DAEMON_BINARY, "/opt/outbox/outboxd");
    assert_eq!(daemon_binary(), Some(PathBuf::from("/opt/outbox/outboxd")));

    std::env::remove_var(vars::OUTBOX_DAEMON_BINARY);
    assert_eq!(daemon_binary(), None);
}
