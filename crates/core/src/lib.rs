// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ob-core: Shared library for the outbox offline sync layer
//!
//! This crate provides the durable storage used by both the `outbox` CLI and
//! the `outboxd` background worker: the pending mutation queue and the
//! versioned response cache generations.

pub mod cache;
pub mod db;
pub mod error;
pub mod mutation;
pub mod store;

pub use cache::{CacheStorage, CachedResponse, RequestKey};
pub use error::{Error, Result};
pub use mutation::{
    Method, MutationId, MutationRequest, MutationStatus, PendingMutation, DEFAULT_MAX_RETRIES,
};
pub use store::{MutationStore, QueueStats};
