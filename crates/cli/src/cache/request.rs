// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;
use ob_core::{CachedResponse, Method};
use serde::Serialize;

/// An outbound read request as seen by the interceptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Absolute URL or origin-relative path (query included).
    pub url: String,
    /// Top-level document navigation (eligible for the shell fallback).
    pub navigate: bool,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Request {
            method,
            url: url.into(),
            navigate: false,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn navigate(url: impl Into<String>) -> Self {
        Request {
            navigate: true,
            ..Self::get(url)
        }
    }
}

/// Where a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    Network,
    ShellCache,
    DynamicCache,
    /// The shell root document served in place of an unreachable page.
    ShellFallback,
    /// Generated locally because nothing else was available.
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub source: ResponseSource,
}

impl Response {
    pub fn network(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Response {
            status,
            headers,
            body,
            source: ResponseSource::Network,
        }
    }

    /// Synthetic 503 returned when neither network nor cache can answer.
    pub fn unavailable() -> Self {
        Response {
            status: 503,
            headers: vec![("content-type".into(), "text/plain".into())],
            body: b"Service Unavailable".to_vec(),
            source: ResponseSource::Synthetic,
        }
    }

    pub fn from_cached(cached: CachedResponse, source: ResponseSource) -> Self {
        Response {
            status: cached.status,
            headers: cached.headers,
            body: cached.body,
            source,
        }
    }

    pub fn to_cached(&self) -> CachedResponse {
        CachedResponse {
            status: self.status,
            headers: self.headers.clone(),
            body: self.body.clone(),
            stored_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
