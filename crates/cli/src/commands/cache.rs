// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `outbox cache`: manage cache generations.

use super::block_on;
use crate::app::App;
use crate::error::Result;

pub fn install(app: &App) -> Result<()> {
    let interceptor = app.interceptor()?;
    let report = block_on(interceptor.install())??;
    println!(
        "Cached {} shell route(s) into {}",
        report.cached,
        interceptor.generations().shell
    );
    for route in &report.failed {
        println!("  not cached: {route}");
    }
    Ok(())
}

pub fn activate(app: &App) -> Result<()> {
    let interceptor = app.interceptor()?;
    let deleted = block_on(interceptor.activate())??;
    if deleted.is_empty() {
        println!("No stale cache generations.");
    }
    for name in deleted {
        println!("Deleted {name}");
    }
    Ok(())
}

pub fn list(app: &App) -> Result<()> {
    let interceptor = app.interceptor()?;
    let generations = block_on(interceptor.generation_summary())??;
    if generations.is_empty() {
        println!("No cache generations.");
    }
    for (name, entries) in generations {
        let marker = if interceptor.generations().is_current(&name) {
            "*"
        } else {
            " "
        };
        println!("{marker} {name} ({entries} entries)");
    }
    Ok(())
}
