// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::sync::test_helpers::{seeded_store, MockEndpoint};
use std::sync::Mutex as StdMutex;

#[derive(Default, Clone)]
struct RecordingNotifier {
    calls: Arc<StdMutex<Vec<(usize, usize)>>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, synced: usize, errors: usize) {
        self.calls.lock().unwrap().push((synced, errors));
    }
}

fn make_context(endpoints: &[&str]) -> (SyncContext<MockEndpoint>, MockEndpoint) {
    let (store, _) = seeded_store(endpoints);
    let endpoint = MockEndpoint::new();
    (SyncContext::new(store, endpoint.clone()), endpoint)
}

#[tokio::test]
async fn concurrent_trigger_is_a_no_op() {
    let (ctx, endpoint) = make_context(&["/tasks"]);
    let (entered, release) = endpoint.gate_health();

    let first = tokio::spawn({
        let ctx = ctx.clone();
        async move { ctx.run_pass(Trigger::Manual).await }
    });
    entered.notified().await;
    assert!(ctx.is_syncing());

    let second = ctx.run_pass(Trigger::Manual).await;
    assert_eq!(second, SyncOutcome::AlreadyRunning);

    release.notify_one();
    let first = first.await.unwrap();
    assert_eq!(
        first,
        SyncOutcome::Bulk {
            synced: 1,
            rejected: 0
        }
    );

    assert_eq!(endpoint.health_calls(), 1);
    assert_eq!(endpoint.batches().len(), 1);
    assert!(!ctx.is_syncing());
    assert_eq!(ctx.status().passes, 1);
    assert_eq!(ctx.stats().await.unwrap().total, 0);
}

#[tokio::test]
async fn guard_is_released_after_each_pass() {
    let (ctx, endpoint) = make_context(&["/tasks"]);
    endpoint.set_reachable(false);

    assert_eq!(ctx.run_pass(Trigger::Manual).await, SyncOutcome::Unreachable);
    assert!(!ctx.is_syncing());

    endpoint.set_reachable(true);
    assert_eq!(ctx.run_pass(Trigger::BackgroundWake).await.synced_count(), 1);
    assert_eq!(ctx.status().passes, 2);
}

#[tokio::test]
async fn notifier_called_only_when_something_synced() {
    let (store, _) = seeded_store(&["/tasks", "/tasks"]);
    let notifier = RecordingNotifier::default();
    let ctx = SyncContext::with_notifier(store, MockEndpoint::new(), Box::new(notifier.clone()));

    ctx.run_pass(Trigger::Manual).await;
    ctx.run_pass(Trigger::Manual).await;

    assert_eq!(*notifier.calls.lock().unwrap(), vec![(2, 0)]);
}

#[tokio::test]
async fn manual_sync_refused_while_offline() {
    let (ctx, endpoint) = make_context(&["/tasks"]);

    assert!(!ctx.is_online());
    assert_eq!(ctx.sync_now().await, SyncOutcome::Offline);
    assert_eq!(endpoint.health_calls(), 0);

    assert!(ctx.check_connectivity().await);
    assert_eq!(ctx.sync_now().await.synced_count(), 1);
}

#[tokio::test]
async fn connectivity_check_records_unreachable() {
    let (ctx, endpoint) = make_context(&[]);
    ctx.set_online(true);
    endpoint.set_reachable(false);

    assert!(!ctx.check_connectivity().await);
    assert!(!ctx.is_online());
}

#[test]
fn set_online_reports_transitions() {
    let (ctx, _) = make_context(&[]);

    assert!(ctx.set_online(true));
    assert!(!ctx.set_online(true));
    assert!(!ctx.set_online(false));
    assert!(!ctx.set_online(false));
    assert!(ctx.set_online(true));
}
