// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cache-first / network-first request interception.

use ob_core::{CacheStorage, Method, RequestKey};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::fetch::Fetch;
use super::generation::Generations;
use super::manifest::{normalize_path, request_identity, ResourceClass, ShellManifest};
use super::request::{Request, Response, ResponseSource};
use crate::blocking::BlockingStore;
use crate::error::Result;

/// Shell documents tried, in order, when a navigation cannot be served.
const SHELL_ROOTS: [&str; 2] = ["/", "/index.html"];

/// Result of pre-caching the shell manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub cached: usize,
    pub failed: Vec<String>,
}

/// Serves GET requests from the cache generations or the network.
pub struct CacheInterceptor<F> {
    storage: BlockingStore<CacheStorage>,
    fetcher: F,
    manifest: ShellManifest,
    generations: Generations,
}

impl<F: Fetch> CacheInterceptor<F> {
    pub fn new(
        storage: CacheStorage,
        fetcher: F,
        manifest: ShellManifest,
        generations: Generations,
    ) -> Self {
        CacheInterceptor {
            storage: BlockingStore::new(storage),
            fetcher,
            manifest,
            generations,
        }
    }

    pub fn generations(&self) -> &Generations {
        &self.generations
    }

    pub fn manifest(&self) -> &ShellManifest {
        &self.manifest
    }

    /// Handle a request. `None` means the caller performs it itself.
    ///
    /// Never fails: storage problems degrade to network or a synthetic 503.
    pub async fn handle(&self, request: &Request) -> Option<Response> {
        if request.method != Method::Get {
            debug!(method = %request.method, url = %request.url, "bypassing cache");
            return None;
        }
        let response = match self.manifest.classify(&request.url) {
            ResourceClass::Shell => self.cache_first(request).await,
            ResourceClass::Dynamic => self.network_first(request).await,
        };
        Some(response)
    }

    async fn cache_first(&self, request: &Request) -> Response {
        let key = RequestKey::get(normalize_path(&request.url));
        if let Some(hit) = self.lookup(&self.generations.shell, &key).await {
            debug!(url = %key.url, "shell cache hit");
            return Response::from_cached(hit, ResponseSource::ShellCache);
        }

        match self.fetcher.fetch(request).await {
            Ok(response) => {
                if response.is_success() {
                    self.store(&self.generations.shell, &key, &response).await;
                }
                response
            }
            Err(e) => {
                warn!(url = %request.url, error = %e, "shell resource unavailable");
                Response::unavailable()
            }
        }
    }

    async fn network_first(&self, request: &Request) -> Response {
        let key = RequestKey::get(request_identity(&request.url));
        let error = match self.fetcher.fetch(request).await {
            Ok(response) => {
                if response.is_success() {
                    self.store(&self.generations.dynamic, &key, &response).await;
                }
                return response;
            }
            Err(e) => e,
        };

        debug!(url = %request.url, error = %error, "network failed, trying cache");
        if let Some(hit) = self.lookup(&self.generations.dynamic, &key).await {
            return Response::from_cached(hit, ResponseSource::DynamicCache);
        }
        if request.navigate {
            for root in SHELL_ROOTS {
                if let Some(hit) = self.lookup(&self.generations.shell, &RequestKey::get(root)).await {
                    return Response::from_cached(hit, ResponseSource::ShellFallback);
                }
            }
        }
        Response::unavailable()
    }

    async fn lookup(&self, generation: &str, key: &RequestKey) -> Option<ob_core::CachedResponse> {
        let (name, wanted) = (generation.to_string(), key.clone());
        match self.storage.run(move |s| s.lookup(&name, &wanted)).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(generation, url = %key.url, error = %e, "cache lookup failed");
                None
            }
        }
    }

    async fn store(&self, generation: &str, key: &RequestKey, response: &Response) {
        if let Err(e) = self.put(generation, key, response).await {
            warn!(generation, url = %key.url, error = %e, "cache write failed");
        }
    }

    async fn put(&self, generation: &str, key: &RequestKey, response: &Response) -> Result<()> {
        let (name, key, cached) = (generation.to_string(), key.clone(), response.to_cached());
        self.storage.run(move |s| s.put(&name, &key, &cached)).await
    }

    /// Pre-cache every shell route. Individual failures are reported, not fatal.
    pub async fn install(&self) -> Result<InstallReport> {
        let shell = self.generations.shell.clone();
        self.storage.run(move |s| s.open_generation(&shell)).await?;

        let mut report = InstallReport::default();
        for route in self.manifest.routes() {
            match self.fetcher.fetch(&Request::get(route)).await {
                Ok(response) if response.is_success() => {
                    let key = RequestKey::get(route);
                    self.put(&self.generations.shell, &key, &response).await?;
                    report.cached += 1;
                }
                Ok(response) => {
                    warn!(route, status = response.status, "shell route not cached");
                    report.failed.push(route.to_string());
                }
                Err(e) => {
                    warn!(route, error = %e, "shell route not cached");
                    report.failed.push(route.to_string());
                }
            }
        }
        info!(
            generation = %self.generations.shell,
            cached = report.cached,
            failed = report.failed.len(),
            "shell installed"
        );
        Ok(report)
    }

    /// Delete every generation that is not current. Returns the deleted names.
    pub async fn activate(&self) -> Result<Vec<String>> {
        let generations = self.generations.clone();
        self.storage
            .run(move |storage| {
                let names = storage.generation_names()?;
                let mut deleted = Vec::new();
                for name in generations.stale(names.iter().map(String::as_str)) {
                    if storage.delete_generation(name)? {
                        info!(generation = name, "deleted stale cache generation");
                        deleted.push(name.to_string());
                    }
                }
                Ok(deleted)
            })
            .await
    }

    /// All stored generation names with their entry counts.
    pub async fn generation_summary(&self) -> Result<Vec<(String, usize)>> {
        self.storage
            .run(|storage| {
                storage
                    .generation_names()?
                    .into_iter()
                    .map(|name| {
                        let count = storage.entry_count(&name)?;
                        Ok((name, count))
                    })
                    .collect()
            })
            .await
    }
}

#[cfg(test)]
#[path = "interceptor_tests.rs"]
mod tests;
