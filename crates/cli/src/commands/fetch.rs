// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `outbox fetch`: read a resource through the cache interceptor.

use std::io::Write;

use super::block_on;
use crate::app::App;
use crate::cache::{Request, Response, ResponseSource};
use crate::error::Result;

pub fn run(app: &App, path: &str, navigate: bool, include: bool) -> Result<()> {
    let interceptor = app.interceptor()?;
    let request = if navigate {
        Request::navigate(path)
    } else {
        Request::get(path)
    };

    let response = block_on(async { interceptor.handle(&request).await })?
        .unwrap_or_else(Response::unavailable);

    let mut stdout = std::io::stdout().lock();
    if include {
        writeln!(stdout, "{}", status_line(&response))?;
        for (name, value) in &response.headers {
            writeln!(stdout, "{name}: {value}")?;
        }
        writeln!(stdout)?;
    }
    stdout.write_all(&response.body)?;
    if !response.body.ends_with(b"\n") {
        writeln!(stdout)?;
    }
    Ok(())
}

fn status_line(response: &Response) -> String {
    let source = match response.source {
        ResponseSource::Network => "network",
        ResponseSource::ShellCache => "shell cache",
        ResponseSource::DynamicCache => "dynamic cache",
        ResponseSource::ShellFallback => "shell fallback",
        ResponseSource::Synthetic => "offline",
    };
    format!("HTTP {} ({source})", response.status)
}
