// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ob_core::{Method, MutationId, MutationRequest, MutationStore};
use serde_json::{json, Value};
use tokio::sync::Notify;

use crate::remote::{
    BatchItem, BatchSyncData, BatchSyncResponse, Endpoint, EndpointFuture, RejectedItem,
    RemoteError, SyncedItem,
};

pub const BASE_URL: &str = "http://localhost:3000/api";

/// How the mock answers the bulk sync endpoint.
#[derive(Debug, Clone)]
pub enum BulkMode {
    /// Acknowledge every item.
    AcceptAll,
    /// Acknowledge only these ids; report the rest as errors.
    AcceptOnly(Vec<MutationId>),
    /// Fail at the transport level.
    Fail,
    /// Answer `success: false`.
    Unsuccessful,
}

#[derive(Debug)]
struct MockState {
    reachable: AtomicBool,
    bulk: Mutex<BulkMode>,
    replay_fails: AtomicBool,
    failing_endpoints: Mutex<HashSet<String>>,
    batches: Mutex<Vec<Vec<BatchItem>>>,
    replays: Mutex<Vec<MutationRequest>>,
    health_calls: AtomicUsize,
    /// When set, `health()` signals `entered` and waits on `release`.
    gate: Mutex<Option<(Arc<Notify>, Arc<Notify>)>>,
}

/// In-memory [`Endpoint`] whose behavior tests script.
#[derive(Debug, Clone)]
pub struct MockEndpoint {
    state: Arc<MockState>,
}

impl MockEndpoint {
    pub fn new() -> Self {
        MockEndpoint {
            state: Arc::new(MockState {
                reachable: AtomicBool::new(true),
                bulk: Mutex::new(BulkMode::AcceptAll),
                replay_fails: AtomicBool::new(false),
                failing_endpoints: Mutex::new(HashSet::new()),
                batches: Mutex::new(Vec::new()),
                replays: Mutex::new(Vec::new()),
                health_calls: AtomicUsize::new(0),
                gate: Mutex::new(None),
            }),
        }
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.state.reachable.store(reachable, Ordering::SeqCst);
    }

    pub fn set_bulk(&self, mode: BulkMode) {
        *self.state.bulk.lock().unwrap() = mode;
    }

    /// Make every direct write and per-item replay fail.
    pub fn set_replay_fails(&self, fails: bool) {
        self.state.replay_fails.store(fails, Ordering::SeqCst);
    }

    /// Make replays of one endpoint path fail.
    pub fn fail_endpoint(&self, endpoint: &str) {
        self.state
            .failing_endpoints
            .lock()
            .unwrap()
            .insert(endpoint.to_string());
    }

    /// Block `health()` until the returned `release` is notified.
    ///
    /// Returns `(entered, release)`.
    pub fn gate_health(&self) -> (Arc<Notify>, Arc<Notify>) {
        let gate = (Arc::new(Notify::new()), Arc::new(Notify::new()));
        *self.state.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn batches(&self) -> Vec<Vec<BatchItem>> {
        self.state.batches.lock().unwrap().clone()
    }

    pub fn replays(&self) -> Vec<MutationRequest> {
        self.state.replays.lock().unwrap().clone()
    }

    pub fn health_calls(&self) -> usize {
        self.state.health_calls.load(Ordering::SeqCst)
    }

    fn bulk_response(&self, items: &[BatchItem]) -> Result<BatchSyncResponse, RemoteError> {
        let mode = self.state.bulk.lock().unwrap().clone();
        let accepted: Vec<MutationId> = match mode {
            BulkMode::Fail => return Err(RemoteError::Unreachable("connection reset".into())),
            BulkMode::Unsuccessful => {
                return Ok(BatchSyncResponse {
                    success: false,
                    message: Some("database locked".into()),
                    data: BatchSyncData::default(),
                })
            }
            BulkMode::AcceptAll => items.iter().map(|i| i.id).collect(),
            BulkMode::AcceptOnly(ids) => ids,
        };
        let synced = accepted
            .iter()
            .filter(|id| items.iter().any(|i| i.id == **id))
            .map(|id| SyncedItem {
                original_id: *id,
                extra: serde_json::Map::new(),
            })
            .collect();
        let errors = items
            .iter()
            .filter(|i| !accepted.contains(&i.id))
            .map(|i| RejectedItem {
                original_id: Some(i.id),
                error: Some("validation failed".into()),
            })
            .collect();
        Ok(BatchSyncResponse {
            success: true,
            message: None,
            data: BatchSyncData { synced, errors },
        })
    }
}

impl Endpoint for MockEndpoint {
    fn health(&self) -> EndpointFuture<'_, ()> {
        Box::pin(async move {
            self.state.health_calls.fetch_add(1, Ordering::SeqCst);
            let gate = self.state.gate.lock().unwrap().clone();
            if let Some((entered, release)) = gate {
                entered.notify_one();
                release.notified().await;
            }
            if self.state.reachable.load(Ordering::SeqCst) {
                Ok(())
            } else {
                Err(RemoteError::Unreachable("connection refused".into()))
            }
        })
    }

    fn batch_sync<'a>(&'a self, items: &'a [BatchItem]) -> EndpointFuture<'a, BatchSyncResponse> {
        Box::pin(async move {
            self.state.batches.lock().unwrap().push(items.to_vec());
            self.bulk_response(items)
        })
    }

    fn replay<'a>(&'a self, request: &'a MutationRequest) -> EndpointFuture<'a, Value> {
        Box::pin(async move {
            self.state.replays.lock().unwrap().push(request.clone());
            let failing = self
                .state
                .failing_endpoints
                .lock()
                .unwrap()
                .contains(&request.endpoint);
            if self.state.replay_fails.load(Ordering::SeqCst) || failing {
                return Err(RemoteError::Status {
                    status: 503,
                    body: "unavailable".into(),
                });
            }
            Ok(json!({"ok": true, "echo": request.payload}))
        })
    }

    fn create_or_update<'a>(
        &'a self,
        _resource: &'a str,
        payload: &'a Value,
    ) -> EndpointFuture<'a, Value> {
        Box::pin(async move { Ok(payload.clone()) })
    }

    fn list<'a>(
        &'a self,
        _resource: &'a str,
        _filter: &'a [(String, String)],
    ) -> EndpointFuture<'a, Value> {
        Box::pin(async move { Ok(json!([])) })
    }
}

/// A request for `endpoint` under [`BASE_URL`].
pub fn make_request(endpoint: &str, title: &str) -> MutationRequest {
    MutationRequest::new(BASE_URL, Method::Post, endpoint, json!({ "title": title }))
}

/// An in-memory store seeded with one pending mutation per endpoint.
pub fn seeded_store(endpoints: &[&str]) -> (MutationStore, Vec<MutationId>) {
    let store = MutationStore::open_in_memory().unwrap();
    let ids = endpoints
        .iter()
        .enumerate()
        .map(|(i, ep)| {
            store
                .save(&make_request(ep, &format!("item {i}")), Some("offline"))
                .unwrap()
        })
        .collect();
    (store, ids)
}
