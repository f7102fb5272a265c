// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `outbox status`: queue counts, connectivity and daemon state.

use ob_core::QueueStats;
use ob_ipc::DaemonStatus;
use serde::Serialize;

use super::block_on;
use crate::app::App;
use crate::cli::OutputFormat;
use crate::daemon;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct StatusReport {
    base_url: String,
    online: bool,
    pending: usize,
    failed: usize,
    total: usize,
    daemon: Option<DaemonStatus>,
}

pub fn run(app: &App, output: OutputFormat) -> Result<()> {
    let ctx = app.sync_context()?;
    let (online, stats) = block_on(async { (ctx.check_connectivity().await, ctx.stats().await) })?;
    let stats = stats?;
    // An unreachable daemon is reported as not running.
    let daemon = daemon::get_daemon_status(app.state_dir()).unwrap_or(None);

    let report = StatusReport::new(app.config.base_url.clone(), online, stats, daemon);
    match output {
        OutputFormat::Text => print!("{}", report.render()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

impl StatusReport {
    fn new(base_url: String, online: bool, stats: QueueStats, daemon: Option<DaemonStatus>) -> Self {
        StatusReport {
            base_url,
            online,
            pending: stats.pending,
            failed: stats.failed,
            total: stats.total,
            daemon,
        }
    }

    fn render(&self) -> String {
        let connectivity = if self.online { "online" } else { "offline" };
        let daemon = match &self.daemon {
            Some(d) => format!(
                "running (PID: {}, uptime: {}s, passes: {}{})",
                d.pid,
                d.uptime_secs,
                d.passes,
                if d.syncing { ", syncing" } else { "" }
            ),
            None => "not running".to_string(),
        };
        format!(
            "Remote: {} ({connectivity})\nPending: {}\nFailed: {}\nDaemon: {daemon}\n",
            self.base_url, self.pending, self.failed
        )
    }
}
