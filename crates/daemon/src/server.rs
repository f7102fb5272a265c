// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request handling for the daemon socket.

use std::time::Instant;

use ob_ipc::{DaemonRequest, DaemonResponse, DaemonStatus};
use outbox::remote::Endpoint;
use outbox::sync::{SyncContext, Trigger};
use tokio::runtime::Handle;
use tracing::{debug, info};

/// Shared state the request handler needs.
pub struct Server<E> {
    ctx: SyncContext<E>,
    runtime: Handle,
    started: Instant,
}

impl<E: Endpoint + 'static> Server<E> {
    pub fn new(ctx: SyncContext<E>, runtime: Handle) -> Self {
        Server {
            ctx,
            runtime,
            started: Instant::now(),
        }
    }

    pub fn handle(&self, request: DaemonRequest) -> DaemonResponse {
        match request {
            DaemonRequest::Ping => DaemonResponse::Pong,
            DaemonRequest::Status => {
                let sync = self.ctx.status();
                DaemonResponse::Status(
                    DaemonStatus::new(std::process::id(), self.started.elapsed().as_secs())
                        .with_sync(sync.online, sync.syncing, sync.passes),
                )
            }
            DaemonRequest::Shutdown => DaemonResponse::ShuttingDown,
            DaemonRequest::Hello { version } => {
                debug!(client_version = %version, "hello");
                DaemonResponse::Hello {
                    version: env!("CARGO_PKG_VERSION").to_string(),
                }
            }
            DaemonRequest::Wake { tag } => {
                info!(%tag, "background wake");
                let ctx = self.ctx.clone();
                self.runtime.spawn(async move {
                    ctx.run_pass(Trigger::BackgroundWake).await;
                });
                DaemonResponse::WakeScheduled { tag }
            }
        }
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
