// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wire format of the bulk sync endpoint.

use ob_core::{Method, MutationId, PendingMutation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One queued request, tagged with its local id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    pub id: MutationId,
    pub url: String,
    pub method: Method,
    pub endpoint: String,
    pub data: Value,
    pub retry_count: u32,
}

impl From<&PendingMutation> for BatchItem {
    fn from(m: &PendingMutation) -> Self {
        BatchItem {
            id: m.id,
            url: m.url.clone(),
            method: m.method,
            endpoint: m.endpoint.clone(),
            data: m.payload.clone(),
            retry_count: m.retry_count,
        }
    }
}

/// Request body: `{"pendingData": [...]}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSyncRequest<'a> {
    pub pending_data: &'a [BatchItem],
}

/// Response body of the bulk sync endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSyncResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub data: BatchSyncData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSyncData {
    #[serde(default)]
    pub synced: Vec<SyncedItem>,
    #[serde(default)]
    pub errors: Vec<RejectedItem>,
}

/// An item the remote accepted. Extra fields (the created record) are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncedItem {
    pub original_id: MutationId,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// An item the remote rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_id: Option<MutationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchSyncResponse {
    /// Local ids the remote acknowledged.
    pub fn synced_ids(&self) -> Vec<MutationId> {
        self.data.synced.iter().map(|s| s.original_id).collect()
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
