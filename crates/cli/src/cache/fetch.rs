// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Network leg of the interceptor.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::debug;

use super::request::{Request, Response};
use crate::remote::RemoteError;

/// A request that produced no HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Response, FetchError>> + Send + 'a>>;

/// Performs network requests for the interceptor.
///
/// Any HTTP status is a successful fetch; only transport failures are errors.
pub trait Fetch: Send + Sync {
    fn fetch<'a>(&'a self, request: &'a Request) -> FetchFuture<'a>;
}

/// reqwest-backed fetcher resolving relative paths against an origin.
pub struct HttpFetcher {
    client: reqwest::Client,
    origin: String,
}

impl HttpFetcher {
    pub fn new(origin: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| RemoteError::InvalidRequest(e.to_string()))?;
        Ok(HttpFetcher {
            client,
            origin: origin.trim_end_matches('/').to_string(),
        })
    }

    fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{url}", self.origin)
        } else {
            format!("{}/{url}", self.origin)
        }
    }
}

impl Fetch for HttpFetcher {
    fn fetch<'a>(&'a self, request: &'a Request) -> FetchFuture<'a> {
        Box::pin(async move {
            let url = self.resolve(&request.url);
            let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
                .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
            debug!(%method, %url, "fetch");

            let response = self
                .client
                .request(method, &url)
                .send()
                .await
                .map_err(|e| {
                    if e.is_builder() {
                        FetchError::InvalidUrl(e.to_string())
                    } else {
                        FetchError::Network(e.to_string())
                    }
                })?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
                .collect();
            let body = response
                .bytes()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?
                .to_vec();
            Ok(Response::network(status, headers, body))
        })
    }
}
