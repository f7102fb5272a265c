// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring of configuration, stores and endpoints.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ob_core::{CacheStorage, MutationStore};

use crate::cache::{CacheInterceptor, Generations, HttpFetcher, ShellManifest};
use crate::config::{self, Config};
use crate::error::Result;
use crate::remote::HttpEndpoint;
use crate::sync::{DaemonWake, Outbox, SyncContext};

/// Resolved state directory plus its configuration.
#[derive(Debug, Clone)]
pub struct App {
    pub state_dir: PathBuf,
    pub config: Config,
}

impl App {
    /// Resolve the state directory from the environment and load its config.
    pub fn load() -> Result<Self> {
        Self::for_state_dir(config::state_dir()?)
    }

    pub fn for_state_dir(state_dir: impl Into<PathBuf>) -> Result<Self> {
        let state_dir = state_dir.into();
        let config = Config::load(&state_dir)?;
        Ok(App { state_dir, config })
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    pub fn open_store(&self) -> Result<MutationStore> {
        let store = MutationStore::open(&config::queue_db_path(&self.state_dir))?;
        Ok(store.with_max_retries(self.config.max_retries))
    }

    pub fn endpoint(&self) -> Result<HttpEndpoint> {
        Ok(HttpEndpoint::from_config(&self.config)?)
    }

    pub fn sync_context(&self) -> Result<SyncContext<HttpEndpoint>> {
        Ok(SyncContext::new(self.open_store()?, self.endpoint()?))
    }

    /// Write path that wakes the daemon serving this state directory.
    pub fn outbox(&self) -> Result<Outbox<HttpEndpoint>> {
        Ok(Outbox::new(
            self.sync_context()?,
            self.config.api_base(),
            Arc::new(DaemonWake::new(&self.state_dir)),
        ))
    }

    pub fn interceptor(&self) -> Result<CacheInterceptor<HttpFetcher>> {
        let storage = CacheStorage::open(&config::cache_db_path(&self.state_dir))?;
        let fetcher = HttpFetcher::new(&self.config.cache.origin, self.config.request_timeout())?;
        Ok(CacheInterceptor::new(
            storage,
            fetcher,
            ShellManifest::new(&self.config.cache.shell_routes),
            Generations::for_version(&self.config.cache.version),
        ))
    }
}
