// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read-side request interception.
//!
//! GET requests are classified against the shell manifest. Shell resources
//! are served cache-first, everything else network-first with a cache
//! fallback. Non-GET requests are never intercepted.

mod fetch;
mod generation;
mod interceptor;
mod manifest;
mod request;

pub use fetch::{Fetch, FetchError, FetchFuture, HttpFetcher};
pub use generation::{Generations, DYNAMIC_PREFIX, SHELL_PREFIX};
pub use interceptor::{CacheInterceptor, InstallReport};
pub use manifest::{normalize_path, request_identity, ResourceClass, ShellManifest};
pub use request::{Request, Response, ResponseSource};

#[cfg(test)]
mod test_helpers;
