// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `outbox sync`: manual trigger.

use super::block_on;
use crate::app::App;
use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::sync::SyncOutcome;

pub fn run(app: &App, output: OutputFormat) -> Result<()> {
    let ctx = app.sync_context()?;
    let outcome = block_on(async {
        ctx.check_connectivity().await;
        ctx.sync_now().await
    })?;

    match output {
        OutputFormat::Text => println!("{outcome}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    match outcome {
        SyncOutcome::Offline => Err(Error::Offline),
        SyncOutcome::StoreUnavailable { reason } => Err(Error::Sync(reason)),
        _ => Ok(()),
    }
}
