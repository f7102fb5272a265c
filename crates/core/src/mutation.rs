// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queued write requests awaiting delivery.
//!
//! A [`PendingMutation`] is created when a write fails to reach the remote
//! endpoint. It carries everything needed to replay the original request
//! verbatim, plus retry bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Number of unsuccessful replays after which a mutation becomes terminal.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Store-assigned identifier of a pending mutation.
pub type MutationId = i64;

/// HTTP method of a queued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Returns the canonical (uppercase) method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Whether this method only reads state.
    pub fn is_read(&self) -> bool {
        matches!(self, Method::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            _ => Err(Error::InvalidMethod(s.to_string())),
        }
    }
}

/// Delivery state of a queued mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationStatus {
    /// Eligible for replay on the next synchronization pass.
    Pending,
    /// Retry budget exhausted. Excluded from automatic passes.
    Failed,
}

impl MutationStatus {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationStatus::Pending => "pending",
            MutationStatus::Failed => "failed",
        }
    }

    /// The status a record must have for the given retry count.
    pub fn for_retry_count(retry_count: u32, max_retries: u32) -> Self {
        if retry_count >= max_retries {
            MutationStatus::Failed
        } else {
            MutationStatus::Pending
        }
    }
}

impl fmt::Display for MutationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MutationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(MutationStatus::Pending),
            "failed" => Ok(MutationStatus::Failed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// The full reconstruction of an outbound write request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationRequest {
    /// Absolute URL the request was sent to.
    pub url: String,
    pub method: Method,
    /// Endpoint path relative to the API base (e.g. `/tasks`).
    pub endpoint: String,
    /// JSON request body.
    pub payload: serde_json::Value,
}

impl MutationRequest {
    /// Build a request for `endpoint` under `base_url`.
    pub fn new(
        base_url: &str,
        method: Method,
        endpoint: &str,
        payload: serde_json::Value,
    ) -> Self {
        let endpoint = if endpoint.starts_with('/') {
            endpoint.to_string()
        } else {
            format!("/{endpoint}")
        };
        MutationRequest {
            url: format!("{}{}", base_url.trim_end_matches('/'), endpoint),
            method,
            endpoint,
            payload,
        }
    }
}

/// A queued write awaiting delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingMutation {
    pub id: MutationId,
    pub url: String,
    pub method: Method,
    pub endpoint: String,
    pub payload: serde_json::Value,
    pub status: MutationStatus,
    pub retry_count: u32,
    pub created_at: DateTime<Utc>,
    pub last_retry_at: Option<DateTime<Utc>>,
    pub failed_at: Option<DateTime<Utc>>,
    /// Failure message recorded when the write was first queued.
    pub last_error: Option<String>,
}

impl PendingMutation {
    /// The original request, ready to be replayed verbatim.
    pub fn request(&self) -> MutationRequest {
        MutationRequest {
            url: self.url.clone(),
            method: self.method,
            endpoint: self.endpoint.clone(),
            payload: self.payload.clone(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == MutationStatus::Pending
    }
}

#[cfg(test)]
#[path = "mutation_tests.rs"]
mod tests;
