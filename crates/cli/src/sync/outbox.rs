// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The write path: deliver directly, queue on failure.

use std::sync::Arc;

use ob_core::{Method, MutationId, MutationRequest};
use ob_ipc::BACKGROUND_SYNC_TAG;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::coordinator::SyncContext;
use super::wake::WakeRegistrar;
use crate::error::Result;
use crate::remote::Endpoint;

/// What happened to a submitted write.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// The remote accepted the write; carries its response body.
    Sent(Value),
    /// Delivery failed; the write was persisted for later replay.
    Queued { id: MutationId, reason: String },
}

/// Write-side entry point that never loses a write to a transient failure.
pub struct Outbox<E> {
    sync: SyncContext<E>,
    base_url: String,
    wake: Arc<dyn WakeRegistrar>,
}

impl<E: Endpoint> Outbox<E> {
    pub fn new(sync: SyncContext<E>, base_url: impl Into<String>, wake: Arc<dyn WakeRegistrar>) -> Self {
        Outbox {
            sync,
            base_url: base_url.into(),
            wake,
        }
    }

    pub fn sync(&self) -> &SyncContext<E> {
        &self.sync
    }

    /// Submit a write. Errors only when the write could neither be
    /// delivered nor persisted.
    pub async fn submit(&self, method: Method, endpoint: &str, payload: Value) -> Result<Delivery> {
        let request = MutationRequest::new(&self.base_url, method, endpoint, payload);
        let reason = match self.sync.endpoint().replay(&request).await {
            Ok(body) => {
                debug!(url = %request.url, "write delivered");
                return Ok(Delivery::Sent(body));
            }
            Err(e) => e.to_string(),
        };

        let (queued, why) = (request.clone(), reason.clone());
        let id = self
            .sync
            .store()
            .run(move |s| s.save(&queued, Some(why.as_str())))
            .await?;
        info!(id, url = %request.url, %reason, "write queued for background sync");
        self.request_wake().await;
        Ok(Delivery::Queued { id, reason })
    }

    /// Best-effort: a failed registration leaves the write queued for the
    /// next connectivity or manual trigger.
    async fn request_wake(&self) {
        let wake = Arc::clone(&self.wake);
        let registered =
            tokio::task::spawn_blocking(move || wake.register(BACKGROUND_SYNC_TAG)).await;
        match registered {
            Ok(Ok(())) => debug!("background sync registered"),
            Ok(Err(e)) => warn!(error = %e, "background sync unavailable"),
            Err(e) => warn!(error = %e, "background sync registration panicked"),
        }
    }
}

#[cfg(test)]
#[path = "outbox_tests.rs"]
mod tests;
