// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read path with nothing reachable and nothing cached.

#![allow(clippy::unwrap_used)]

#[path = "common.rs"]
mod common;

use common::*;

#[test]
fn fetch_offline_without_cache_is_503() {
    let env = OfflineEnv::new();
    env.cmd()
        .args(["fetch", "/api/tasks", "-i"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HTTP 503 (offline)"))
        .stdout(predicate::str::contains("content-type: text/plain"))
        .stdout(predicate::str::contains("Service Unavailable"));
}

#[test]
fn navigation_offline_without_shell_is_503() {
    let env = OfflineEnv::new();
    env.cmd()
        .args(["fetch", "/settings", "--navigate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Service Unavailable"));
}

#[test]
fn install_offline_caches_nothing() {
    let env = OfflineEnv::new();
    env.cmd()
        .args(["cache", "install"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Cached 0 shell route(s) into app-shell-v1.1.0",
        ))
        .stdout(predicate::str::contains("not cached: /index.html"));

    env.cmd()
        .args(["cache", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* app-shell-v1.1.0 (0 entries)"));
}

#[test]
fn list_with_no_generations() {
    let env = OfflineEnv::new();
    env.cmd()
        .args(["cache", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cache generations."));
}

#[test]
fn activate_with_nothing_stale() {
    let env = OfflineEnv::new();
    env.cmd()
        .args(["cache", "activate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No stale cache generations."));
}
