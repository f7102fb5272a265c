// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! A single synchronization pass over the mutation store.

use std::collections::HashSet;
use std::fmt;

use ob_core::{MutationId, MutationStatus, MutationStore, PendingMutation};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::blocking::BlockingStore;
use crate::remote::{BatchItem, BatchSyncResponse, Endpoint, RemoteError};

/// Result of one sync pass. Nothing escapes a pass as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Another pass holds the guard; this one did nothing.
    AlreadyRunning,
    /// Last-known connectivity is offline; a manual pass was refused.
    Offline,
    /// The health check failed.
    Unreachable,
    NothingPending,
    /// The bulk endpoint answered.
    Bulk { synced: usize, rejected: usize },
    /// The bulk endpoint failed and items were replayed one by one.
    PerItem {
        delivered: usize,
        retried: usize,
        failed: usize,
    },
    /// The store could not be read.
    StoreUnavailable { reason: String },
}

impl SyncOutcome {
    /// Number of mutations delivered and removed from the store.
    pub fn synced_count(&self) -> usize {
        match self {
            SyncOutcome::Bulk { synced, .. } => *synced,
            SyncOutcome::PerItem { delivered, .. } => *delivered,
            _ => 0,
        }
    }

    /// Number of mutations that were not delivered during the pass.
    pub fn error_count(&self) -> usize {
        match self {
            SyncOutcome::Bulk { rejected, .. } => *rejected,
            SyncOutcome::PerItem {
                retried, failed, ..
            } => retried + failed,
            _ => 0,
        }
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOutcome::AlreadyRunning => write!(f, "sync already in progress"),
            SyncOutcome::Offline => write!(f, "offline, sync skipped"),
            SyncOutcome::Unreachable => write!(f, "remote unreachable, sync skipped"),
            SyncOutcome::NothingPending => write!(f, "nothing to sync"),
            SyncOutcome::Bulk { synced, rejected } => {
                write!(f, "bulk sync: {synced} synced, {rejected} rejected")
            }
            SyncOutcome::PerItem {
                delivered,
                retried,
                failed,
            } => write!(
                f,
                "replayed individually: {delivered} delivered, {retried} will retry, {failed} failed"
            ),
            SyncOutcome::StoreUnavailable { reason } => write!(f, "store unavailable: {reason}"),
        }
    }
}

/// Run one pass: health check, load pending, bulk replay, per-item fallback.
///
/// The caller is responsible for single-flight exclusion.
pub async fn run_sync_pass<E>(store: &BlockingStore<MutationStore>, endpoint: &E) -> SyncOutcome
where
    E: Endpoint + ?Sized,
{
    if let Err(e) = endpoint.health().await {
        info!(error = %e, "remote unreachable, skipping sync");
        return SyncOutcome::Unreachable;
    }

    let pending = match load_pending(store).await {
        Ok(pending) => pending,
        Err(outcome) => return outcome,
    };
    if pending.is_empty() {
        debug!("no pending mutations");
        return SyncOutcome::NothingPending;
    }

    info!(count = pending.len(), "syncing pending mutations");
    let items: Vec<BatchItem> = pending.iter().map(BatchItem::from).collect();
    let bulk = endpoint
        .batch_sync(&items)
        .await
        .and_then(ensure_success);

    match bulk {
        Ok(response) => apply_bulk(store, &pending, &response).await,
        Err(e) => {
            warn!(error = %e, "bulk sync failed, replaying individually");
            replay_each(store, endpoint).await
        }
    }
}

fn ensure_success(response: BatchSyncResponse) -> Result<BatchSyncResponse, RemoteError> {
    if response.success {
        Ok(response)
    } else {
        Err(RemoteError::Decode(format!(
            "bulk sync reported failure: {}",
            response.message.as_deref().unwrap_or("no message")
        )))
    }
}

async fn load_pending(
    store: &BlockingStore<MutationStore>,
) -> Result<Vec<PendingMutation>, SyncOutcome> {
    store.run(|s| s.get_pending()).await.map_err(|e| {
        error!(error = %e, "failed to read pending mutations");
        SyncOutcome::StoreUnavailable {
            reason: e.to_string(),
        }
    })
}

async fn apply_bulk(
    store: &BlockingStore<MutationStore>,
    pending: &[PendingMutation],
    response: &BatchSyncResponse,
) -> SyncOutcome {
    let batch: HashSet<MutationId> = pending.iter().map(|m| m.id).collect();
    let mut synced = 0;

    for id in response.synced_ids() {
        if !batch.contains(&id) {
            warn!(id, "remote acknowledged an id that was not in the batch");
            continue;
        }
        match store.run(move |s| s.delete(id)).await {
            Ok(true) => synced += 1,
            Ok(false) => debug!(id, "synced mutation already removed"),
            Err(e) => error!(id, error = %e, "failed to delete synced mutation"),
        }
    }

    let rejected = response.data.errors.len();
    for rejection in &response.data.errors {
        warn!(
            id = ?rejection.original_id,
            error = rejection.error.as_deref().unwrap_or("unknown"),
            "remote rejected mutation"
        );
    }
    info!(synced, rejected, "bulk sync complete");
    SyncOutcome::Bulk { synced, rejected }
}

async fn replay_each<E>(store: &BlockingStore<MutationStore>, endpoint: &E) -> SyncOutcome
where
    E: Endpoint + ?Sized,
{
    let pending = match load_pending(store).await {
        Ok(pending) => pending,
        Err(outcome) => return outcome,
    };

    let (mut delivered, mut retried, mut failed) = (0, 0, 0);
    for mutation in pending {
        let id = mutation.id;
        match endpoint.replay(&mutation.request()).await {
            Ok(_) => {
                if let Err(e) = store.run(move |s| s.delete(id)).await {
                    error!(id, error = %e, "failed to delete delivered mutation");
                }
                delivered += 1;
            }
            Err(e) => {
                debug!(id, error = %e, "replay failed");
                let next = mutation.retry_count + 1;
                let updated = store.run(move |s| s.update_retry_count(id, next)).await;
                match updated {
                    Ok(m) if m.status == MutationStatus::Failed => failed += 1,
                    Ok(_) => retried += 1,
                    Err(e) => {
                        error!(id, error = %e, "failed to record retry");
                        retried += 1;
                    }
                }
            }
        }
    }

    info!(delivered, retried, failed, "per-item replay complete");
    SyncOutcome::PerItem {
        delivered,
        retried,
        failed,
    }
}

#[cfg(test)]
#[path = "pass_tests.rs"]
mod tests;
