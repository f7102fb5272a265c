// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::future::Future;
use std::pin::Pin;

use ob_core::MutationRequest;
use serde_json::Value;

use super::protocol::{BatchItem, BatchSyncResponse};

/// Error type for remote operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The request never produced an HTTP response.
    #[error("remote unreachable: {0}")]
    Unreachable(String),

    /// The remote answered with a non-success status.
    #[error("remote returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Boxed future returned by [`Endpoint`] methods.
pub type EndpointFuture<'a, T> = Pin<Box<dyn Future<Output = RemoteResult<T>> + Send + 'a>>;

/// The remote API that writes are delivered to.
///
/// Object-safe so that callers can hold `Box<dyn Endpoint>`; tests substitute
/// in-memory implementations.
pub trait Endpoint: Send + Sync {
    /// Lightweight reachability check.
    fn health(&self) -> EndpointFuture<'_, ()>;

    /// Deliver every pending item in one request.
    fn batch_sync<'a>(&'a self, items: &'a [BatchItem]) -> EndpointFuture<'a, BatchSyncResponse>;

    /// Re-issue a single queued request verbatim.
    fn replay<'a>(&'a self, request: &'a MutationRequest) -> EndpointFuture<'a, Value>;

    /// Create a resource, or update it when the payload carries an `id`.
    fn create_or_update<'a>(
        &'a self,
        resource: &'a str,
        payload: &'a Value,
    ) -> EndpointFuture<'a, Value>;

    /// List a resource collection with optional query filters.
    fn list<'a>(
        &'a self,
        resource: &'a str,
        filter: &'a [(String, String)],
    ) -> EndpointFuture<'a, Value>;
}

impl<E: Endpoint + ?Sized> Endpoint for Box<E> {
    fn health(&self) -> EndpointFuture<'_, ()> {
        (**self).health()
    }

    fn batch_sync<'a>(&'a self, items: &'a [BatchItem]) -> EndpointFuture<'a, BatchSyncResponse> {
        (**self).batch_sync(items)
    }

    fn replay<'a>(&'a self, request: &'a MutationRequest) -> EndpointFuture<'a, Value> {
        (**self).replay(request)
    }

    fn create_or_update<'a>(
        &'a self,
        resource: &'a str,
        payload: &'a Value,
    ) -> EndpointFuture<'a, Value> {
        (**self).create_or_update(resource, payload)
    }

    fn list<'a>(
        &'a self,
        resource: &'a str,
        filter: &'a [(String, String)],
    ) -> EndpointFuture<'a, Value> {
        (**self).list(resource, filter)
    }
}
