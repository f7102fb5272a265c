// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared SQLite handles driven from async code.
//!
//! rusqlite calls block (up to `busy_timeout` while another process holds
//! the write lock), so every call runs on tokio's blocking pool instead of a
//! runtime worker.

use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};

/// A store shared between tasks; each call runs on the blocking pool.
pub struct BlockingStore<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Clone for BlockingStore<T> {
    fn clone(&self) -> Self {
        BlockingStore {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + 'static> BlockingStore<T> {
    pub fn new(store: T) -> Self {
        BlockingStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store.
    pub async fn run<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&T) -> ob_core::Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let store = inner
                .lock()
                .map_err(|_| Error::Blocking("store lock poisoned".into()))?;
            Ok(f(&store)?)
        })
        .await
        .map_err(|e| Error::Blocking(e.to_string()))?
    }
}
