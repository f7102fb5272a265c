// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::cache::FetchError;
use crate::remote::RemoteError;

/// All possible errors that can occur in the outbox library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid payload: {0}\n  hint: payloads must be a JSON document, e.g. '{{\"title\": \"buy milk\"}}'")]
    InvalidPayload(String),

    #[error("daemon error: {0}")]
    Daemon(String),

    #[error("remote is offline\n  hint: manual sync requires connectivity; queued writes will sync once it returns")]
    Offline,

    #[error("sync failed: {0}")]
    Sync(String),

    #[error("storage task failed: {0}")]
    Blocking(String),

    #[error(transparent)]
    Store(#[from] ob_core::Error),

    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A specialized Result type for outbox operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
