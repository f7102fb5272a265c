// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::sync::test_helpers::{seeded_store, MockEndpoint};
use yare::parameterized;

#[parameterized(
    connectivity = { Trigger::ConnectivityRestored, "connectivity-restored" },
    wake = { Trigger::BackgroundWake, "background-wake" },
    manual = { Trigger::Manual, "manual" },
)]
fn trigger_display(trigger: Trigger, expected: &str) {
    assert_eq!(trigger.to_string(), expected);
}

#[tokio::test]
async fn tick_syncs_only_on_transition_to_online() {
    let (store, _) = seeded_store(&["/tasks"]);
    let endpoint = MockEndpoint::new();
    let ctx = SyncContext::new(store, endpoint.clone());
    let monitor = ConnectivityMonitor::new(Duration::from_millis(10));

    endpoint.set_reachable(false);
    assert_eq!(monitor.tick(&ctx).await, None);
    assert!(!ctx.is_online());

    endpoint.set_reachable(true);
    let outcome = monitor.tick(&ctx).await.unwrap();
    assert_eq!(outcome.synced_count(), 1);
    assert!(ctx.is_online());

    // Still online: no second pass.
    assert_eq!(monitor.tick(&ctx).await, None);
    assert_eq!(endpoint.batches().len(), 1);
}

#[tokio::test]
async fn run_stops_on_shutdown() {
    let (store, _) = seeded_store(&["/tasks"]);
    let endpoint = MockEndpoint::new();
    let ctx = SyncContext::new(store, endpoint.clone());
    let (tx, rx) = watch::channel(false);

    let handle = tokio::spawn(ConnectivityMonitor::new(Duration::from_millis(5)).run(ctx.clone(), rx));
    tokio::time::timeout(Duration::from_secs(5), async {
        while ctx.stats().await.unwrap().total > 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();

    tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
}
