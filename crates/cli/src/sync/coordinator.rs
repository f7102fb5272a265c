// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Single-flight sync coordination.
//!
//! A [`SyncContext`] is the handle every trigger goes through. It owns the
//! store, the endpoint, the in-progress flag and last-known connectivity.
//! Clones share the same state.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use ob_core::{MutationStore, QueueStats};
use tracing::{debug, info};

use super::notify::{LogNotifier, Notifier};
use super::pass::{run_sync_pass, SyncOutcome};
use super::trigger::Trigger;
use crate::blocking::BlockingStore;
use crate::error::Result;
use crate::remote::Endpoint;

/// Snapshot of the in-memory sync session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncStatus {
    pub online: bool,
    pub syncing: bool,
    pub passes: u64,
}

struct SyncInner<E> {
    store: BlockingStore<MutationStore>,
    endpoint: E,
    notifier: Box<dyn Notifier>,
    in_progress: AtomicBool,
    online: AtomicBool,
    passes: AtomicU64,
}

/// Shared handle to the sync session.
pub struct SyncContext<E> {
    inner: Arc<SyncInner<E>>,
}

impl<E> Clone for SyncContext<E> {
    fn clone(&self) -> Self {
        SyncContext {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Resets the in-progress flag when a pass ends, on every path.
struct PassGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> PassGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PassGuard { flag })
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl<E: Endpoint> SyncContext<E> {
    /// Creates a context that reports summaries through `tracing`.
    ///
    /// Connectivity starts out unknown and is treated as offline until a
    /// health check succeeds.
    pub fn new(store: MutationStore, endpoint: E) -> Self {
        Self::with_notifier(store, endpoint, Box::new(LogNotifier))
    }

    pub fn with_notifier(store: MutationStore, endpoint: E, notifier: Box<dyn Notifier>) -> Self {
        SyncContext {
            inner: Arc::new(SyncInner {
                store: BlockingStore::new(store),
                endpoint,
                notifier,
                in_progress: AtomicBool::new(false),
                online: AtomicBool::new(false),
                passes: AtomicU64::new(0),
            }),
        }
    }

    pub fn store(&self) -> &BlockingStore<MutationStore> {
        &self.inner.store
    }

    pub fn endpoint(&self) -> &E {
        &self.inner.endpoint
    }

    pub fn is_syncing(&self) -> bool {
        self.inner.in_progress.load(Ordering::Acquire)
    }

    pub fn is_online(&self) -> bool {
        self.inner.online.load(Ordering::Acquire)
    }

    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            online: self.is_online(),
            syncing: self.is_syncing(),
            passes: self.inner.passes.load(Ordering::Acquire),
        }
    }

    /// Records connectivity. Returns true on an offline to online transition.
    pub fn set_online(&self, online: bool) -> bool {
        let was_online = self.inner.online.swap(online, Ordering::AcqRel);
        if was_online != online {
            info!(online, "connectivity changed");
        }
        online && !was_online
    }

    /// Checks the endpoint health and records the result.
    pub async fn check_connectivity(&self) -> bool {
        let reachable = self.inner.endpoint.health().await.is_ok();
        self.set_online(reachable);
        reachable
    }

    /// Runs one pass unless another is in progress.
    pub async fn run_pass(&self, trigger: Trigger) -> SyncOutcome {
        let Some(_guard) = PassGuard::acquire(&self.inner.in_progress) else {
            info!(%trigger, "sync already in progress, skipping");
            return SyncOutcome::AlreadyRunning;
        };

        debug!(%trigger, "starting sync pass");
        let outcome = run_sync_pass(&self.inner.store, &self.inner.endpoint).await;
        self.inner.passes.fetch_add(1, Ordering::AcqRel);
        info!(%trigger, %outcome, "sync pass finished");

        let synced = outcome.synced_count();
        if synced > 0 {
            self.inner.notifier.notify(synced, outcome.error_count());
        }
        outcome
    }

    /// Manual trigger. Refused while last-known connectivity is offline.
    pub async fn sync_now(&self) -> SyncOutcome {
        if !self.is_online() {
            info!("offline, manual sync refused");
            return SyncOutcome::Offline;
        }
        self.run_pass(Trigger::Manual).await
    }

    pub async fn stats(&self) -> Result<QueueStats> {
        self.inner.store.run(|s| s.stats()).await
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
