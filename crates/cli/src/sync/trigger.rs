// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Events that start a sync pass.

use std::fmt;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use super::coordinator::SyncContext;
use super::pass::SyncOutcome;
use crate::remote::Endpoint;

/// What asked for a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Connectivity went from offline to online.
    ConnectivityRestored,
    /// The daemon was woken by a queued write.
    BackgroundWake,
    /// The user asked for a sync.
    Manual,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Trigger::ConnectivityRestored => "connectivity-restored",
            Trigger::BackgroundWake => "background-wake",
            Trigger::Manual => "manual",
        };
        f.write_str(name)
    }
}

/// Polls the endpoint's health and syncs whenever connectivity returns.
#[derive(Debug, Clone)]
pub struct ConnectivityMonitor {
    interval: Duration,
}

impl ConnectivityMonitor {
    pub fn new(interval: Duration) -> Self {
        ConnectivityMonitor { interval }
    }

    /// One polling step: check, record, and run a pass on a transition to online.
    pub async fn tick<E: Endpoint>(&self, ctx: &SyncContext<E>) -> Option<SyncOutcome> {
        let reachable = ctx.endpoint().health().await.is_ok();
        if ctx.set_online(reachable) {
            info!("connectivity restored, syncing");
            return Some(ctx.run_pass(Trigger::ConnectivityRestored).await);
        }
        None
    }

    /// Polls until `shutdown` flips to true or its sender is dropped.
    pub async fn run<E: Endpoint>(self, ctx: SyncContext<E>, mut shutdown: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.tick(&ctx).await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("connectivity monitor stopping");
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
