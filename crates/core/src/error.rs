// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for ob-core operations.

use thiserror::Error;

/// All possible errors that can occur in ob-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("pending mutation not found: {0}")]
    MutationNotFound(i64),

    #[error("invalid mutation status: '{0}'\n  hint: valid statuses are: pending, failed")]
    InvalidStatus(String),

    #[error("invalid method: '{0}'\n  hint: valid methods are: GET, POST, PUT, PATCH, DELETE")]
    InvalidMethod(String),

    #[error("invalid cache generation name: '{0}'")]
    InvalidGeneration(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for ob-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
