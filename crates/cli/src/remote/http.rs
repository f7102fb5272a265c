// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP implementation of [`Endpoint`] using reqwest.

use std::time::{Duration, Instant};

use ob_core::{Method, MutationRequest};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, trace};

use super::endpoint::{Endpoint, EndpointFuture, RemoteError, RemoteResult};
use super::protocol::{BatchItem, BatchSyncRequest, BatchSyncResponse};
use crate::config::Config;

/// Maximum number of response body bytes carried into an error message.
const ERROR_BODY_LIMIT: usize = 512;

/// Remote API reached over HTTP.
pub struct HttpEndpoint {
    client: reqwest::Client,
    /// API base URL (without trailing `/`).
    base: String,
    /// Server origin the health check is issued against.
    origin: String,
}

impl HttpEndpoint {
    /// Creates an endpoint for `base_url`.
    ///
    /// The health check targets the base URL with a trailing `/api` removed.
    pub fn new(base_url: &str, timeout: Duration, auth_token: Option<&str>) -> RemoteResult<Self> {
        if base_url.trim().is_empty() {
            return Err(RemoteError::InvalidRequest(
                "base_url must not be empty".into(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = auth_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| RemoteError::InvalidRequest(format!("invalid auth_token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| RemoteError::InvalidRequest(e.to_string()))?;

        let base = base_url.trim_end_matches('/').to_string();
        let origin = base.strip_suffix("/api").unwrap_or(&base).to_string();
        Ok(HttpEndpoint {
            client,
            base,
            origin,
        })
    }

    pub fn from_config(config: &Config) -> RemoteResult<Self> {
        Self::new(
            &config.base_url,
            config.request_timeout(),
            config.auth_token.as_deref(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn resource_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base, resource.trim_matches('/'))
    }

    /// Execute a request and return the body of a 2xx response.
    async fn send(&self, request: reqwest::RequestBuilder) -> RemoteResult<String> {
        let request = request
            .build()
            .map_err(|e| RemoteError::InvalidRequest(e.to_string()))?;

        let start = Instant::now();
        debug!(method = %request.method(), url = %request.url(), "api request");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| RemoteError::Unreachable(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RemoteError::Unreachable(e.to_string()))?;

        debug!(
            status = status.as_u16(),
            ms = start.elapsed().as_millis(),
            bytes = text.len(),
            "api response"
        );
        if tracing::enabled!(tracing::Level::TRACE) {
            trace!(body = %truncate(&text, 4096), "api response body");
        }

        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body: truncate(&text, ERROR_BODY_LIMIT).to_string(),
            });
        }
        Ok(text)
    }

    /// Execute a request and decode the JSON response.
    ///
    /// An empty success body decodes to `Value::Null`.
    async fn send_json(&self, request: reqwest::RequestBuilder) -> RemoteResult<Value> {
        let text = self.send(request).await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

fn truncate(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Extracts a record id usable in a URL path segment.
fn payload_id(payload: &Value) -> Option<String> {
    match payload.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

impl Endpoint for HttpEndpoint {
    fn health(&self) -> EndpointFuture<'_, ()> {
        Box::pin(async move {
            // Any 2xx counts; the body is not inspected.
            self.send(self.client.get(format!("{}/health", self.origin)))
                .await
                .map(|_| ())
        })
    }

    fn batch_sync<'a>(&'a self, items: &'a [BatchItem]) -> EndpointFuture<'a, BatchSyncResponse> {
        Box::pin(async move {
            let body = BatchSyncRequest {
                pending_data: items,
            };
            let value = self
                .send_json(
                    self.client
                        .post(format!("{}/sync/pending", self.base))
                        .json(&body),
                )
                .await?;
            serde_json::from_value(value).map_err(|e| RemoteError::Decode(e.to_string()))
        })
    }

    fn replay<'a>(&'a self, request: &'a MutationRequest) -> EndpointFuture<'a, Value> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(reqwest_method(request.method), &request.url);
            if !request.method.is_read() && !request.payload.is_null() {
                builder = builder.json(&request.payload);
            }
            self.send_json(builder).await
        })
    }

    fn create_or_update<'a>(
        &'a self,
        resource: &'a str,
        payload: &'a Value,
    ) -> EndpointFuture<'a, Value> {
        Box::pin(async move {
            let builder = match payload_id(payload) {
                Some(id) => self
                    .client
                    .put(format!("{}/{id}", self.resource_url(resource))),
                None => self.client.post(self.resource_url(resource)),
            };
            self.send_json(builder.json(payload)).await
        })
    }

    fn list<'a>(
        &'a self,
        resource: &'a str,
        filter: &'a [(String, String)],
    ) -> EndpointFuture<'a, Value> {
        Box::pin(async move {
            self.send_json(self.client.get(self.resource_url(resource)).query(filter))
                .await
        })
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
