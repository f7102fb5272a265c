// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote API abstraction.
//!
//! Provides a trait-based endpoint layer that enables:
//! - Real HTTP delivery for production ([`HttpEndpoint`])
//! - Mock endpoints for unit testing

mod endpoint;
mod http;
mod protocol;

pub use endpoint::{Endpoint, EndpointFuture, RemoteError, RemoteResult};
pub use http::HttpEndpoint;
pub use protocol::{BatchItem, BatchSyncData, BatchSyncRequest, BatchSyncResponse, RejectedItem, SyncedItem};
