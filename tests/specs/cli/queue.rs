// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Write path and queue maintenance with the API unreachable.

#![allow(clippy::unwrap_used)]

#[path = "common.rs"]
mod common;

use common::*;

#[test]
fn submit_while_offline_queues_the_write() {
    let env = OfflineEnv::new();
    env.cmd()
        .args(["submit", "/tasks", "-d", r#"{"title": "buy milk"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Queued POST /tasks as #1"))
        .stdout(predicate::str::contains("reason:"));
}

#[test]
fn submit_rejects_invalid_json() {
    let env = OfflineEnv::new();
    env.cmd()
        .args(["submit", "/tasks", "-d", "{title"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid payload"));

    env.cmd()
        .args(["queue", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Queue is empty."));
}

#[test]
fn queued_writes_persist_across_invocations() {
    let env = OfflineEnv::new();
    env.submit("/tasks", r#"{"title": "a"}"#);
    env.cmd()
        .args(["submit", "/tasks/4", "-X", "put", "-d", r#"{"id": 4, "completed": true}"#])
        .assert()
        .success();

    env.cmd()
        .args(["queue", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 [pending] POST /tasks"))
        .stdout(predicate::str::contains("#2 [pending] PUT /tasks/4"));
}

#[test]
fn queue_list_json() {
    let env = OfflineEnv::new();
    env.submit("/tasks", r#"{"title": "a"}"#);

    let output = env
        .cmd()
        .args(["queue", "list", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["endpoint"], "/tasks");
    assert_eq!(items[0]["method"], "POST");
    assert_eq!(items[0]["status"], "pending");
    assert_eq!(items[0]["retry_count"], 0);
    assert_eq!(items[0]["payload"]["title"], "a");
    assert_eq!(items[0]["url"], format!("{UNREACHABLE_ORIGIN}/api/tasks"));
}

#[test]
fn failed_filter_hides_pending() {
    let env = OfflineEnv::new();
    env.submit("/tasks", "{}");
    env.cmd()
        .args(["queue", "list", "--failed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Queue is empty."));
}

#[test]
fn status_reports_offline_and_pending_count() {
    let env = OfflineEnv::new();
    env.submit("/tasks", "{}");
    env.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("(offline)"))
        .stdout(predicate::str::contains("Pending: 1"))
        .stdout(predicate::str::contains("Failed: 0"))
        .stdout(predicate::str::contains("Daemon: not running"));
}

#[test]
fn status_json() {
    let env = OfflineEnv::new();
    let output = env.cmd().args(["status", "-o", "json"]).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["online"], false);
    assert_eq!(report["pending"], 0);
    assert!(report["daemon"].is_null());
}

#[test]
fn manual_sync_refused_while_offline() {
    let env = OfflineEnv::new();
    env.submit("/tasks", "{}");
    env.cmd()
        .arg("sync")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("offline, sync skipped"))
        .stderr(predicate::str::contains("remote is offline"));

    // Still queued
    env.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending: 1"));
}

#[test]
fn purge_failed_with_nothing_failed() {
    let env = OfflineEnv::new();
    env.submit("/tasks", "{}");
    env.cmd()
        .args(["queue", "purge-failed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No failed writes."));
}

#[test]
fn daemon_status_when_not_running() {
    let env = OfflineEnv::new();
    env.cmd()
        .args(["daemon", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not running"));
}

#[test]
fn daemon_logs_without_log_file() {
    let env = OfflineEnv::new();
    env.cmd()
        .args(["daemon", "logs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No daemon logs found"));
}

#[test]
fn daemon_logs_prints_log_file() {
    let env = OfflineEnv::new();
    std::fs::write(
        env.temp.path().join("daemon.log"),
        "INFO outboxd starting\n",
    )
    .unwrap();
    env.cmd()
        .args(["daemon", "logs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("outboxd starting"));
}
