// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for `outbox` argument parsing and help output.

#![allow(clippy::unwrap_used)]

#[path = "common.rs"]
mod common;

use common::*;
use yare::parameterized;

#[parameterized(
    submit = { "submit" },
    sync = { "sync" },
    status = { "status" },
    queue = { "queue" },
    fetch = { "fetch" },
    cache = { "cache" },
    daemon = { "daemon" },
    watch = { "watch" },
)]
fn help_lists_command(name: &str) {
    outbox()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(name));
}

#[test]
fn version_flag_prints_version() {
    outbox()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("outbox"))
        .stdout(predicate::str::is_match(r"[0-9]+\.[0-9]+\.[0-9]+").unwrap());
}

#[test]
fn unknown_method_is_rejected() {
    let env = OfflineEnv::new();
    env.cmd()
        .args(["submit", "/tasks", "-X", "FETCH", "-d", "{}"])
        .assert()
        .failure();
}

#[test]
fn empty_endpoint_is_rejected() {
    let env = OfflineEnv::new();
    env.cmd()
        .args(["submit", "  ", "-d", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

#[test]
fn invalid_config_is_reported() {
    let env = OfflineEnv::new();
    std::fs::write(
        env.temp.path().join("outbox.toml"),
        "base_url = \"ftp://example.com\"\n",
    )
    .unwrap();
    env.cmd()
        .arg("status")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error:"));
}
