// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `outbox queue`: inspect and maintain queued writes.

use ob_core::PendingMutation;

use crate::app::App;
use crate::cli::OutputFormat;
use crate::error::Result;

pub fn list(app: &App, failed_only: bool, output: OutputFormat) -> Result<()> {
    let store = app.open_store()?;
    let mutations: Vec<PendingMutation> = store
        .get_all()?
        .into_iter()
        .filter(|m| !failed_only || !m.is_pending())
        .collect();

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&mutations)?),
        OutputFormat::Text => {
            if mutations.is_empty() {
                println!("Queue is empty.");
            }
            for m in &mutations {
                println!("{}", format_line(m));
            }
        }
    }
    Ok(())
}

pub fn purge_failed(app: &App) -> Result<()> {
    let removed = app.open_store()?.purge_failed()?;
    match removed {
        0 => println!("No failed writes."),
        1 => println!("Removed 1 failed write."),
        n => println!("Removed {n} failed writes."),
    }
    Ok(())
}

/// One-line summary: `#id [status] METHOD endpoint (retries N, queued at)`.
pub(crate) fn format_line(m: &PendingMutation) -> String {
    let mut line = format!(
        "#{} [{}] {} {} (retries: {}, queued {})",
        m.id,
        m.status,
        m.method,
        m.endpoint,
        m.retry_count,
        m.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    if let Some(error) = &m.last_error {
        line.push_str(&format!("\n    {error}"));
    }
    line
}
