// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `outbox watch`: foreground connectivity monitor.

use tokio::sync::watch;
use tracing::info;

use super::block_on;
use crate::app::App;
use crate::error::Result;
use crate::sync::ConnectivityMonitor;

pub fn run(app: &App) -> Result<()> {
    let ctx = app.sync_context()?;
    let monitor = ConnectivityMonitor::new(app.config.poll_interval());
    println!(
        "Watching {} every {}s (Ctrl-C to stop)",
        app.config.server_origin(),
        app.config.daemon.poll_interval_secs
    );

    block_on(async move {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(monitor.run(ctx, shutdown_rx));
        let _ = tokio::signal::ctrl_c().await;
        info!("interrupted, stopping monitor");
        let _ = shutdown_tx.send(true);
        let _ = task.await;
    })?;
    Ok(())
}
