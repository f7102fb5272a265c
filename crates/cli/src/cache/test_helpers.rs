// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scriptable fetcher for interceptor tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::fetch::{Fetch, FetchError, FetchFuture};
use super::request::{Request, Response};

#[derive(Debug, Default)]
struct MockState {
    offline: AtomicBool,
    routes: Mutex<HashMap<String, (u16, String)>>,
    requests: Mutex<Vec<String>>,
}

/// Serves canned bodies per URL; unknown URLs answer 404.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    state: Arc<MockState>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, url: &str, status: u16, body: &str) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(url.to_string(), (status, body.to_string()));
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.offline.store(offline, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Fetch for MockFetcher {
    fn fetch<'a>(&'a self, request: &'a Request) -> FetchFuture<'a> {
        Box::pin(async move {
            self.state.requests.lock().unwrap().push(request.url.clone());
            if self.state.offline.load(Ordering::SeqCst) {
                return Err(FetchError::Network("offline".into()));
            }
            let route = self.state.routes.lock().unwrap().get(&request.url).cloned();
            let (status, body) = route.unwrap_or((404, "not found".to_string()));
            Ok(Response::network(
                status,
                vec![("content-type".into(), "text/html".into())],
                body.into_bytes(),
            ))
        })
    }
}
