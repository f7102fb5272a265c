// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `outbox submit`: the write path.

use ob_core::Method;
use serde_json::Value;

use super::block_on;
use crate::app::App;
use crate::error::{Error, Result};
use crate::sync::Delivery;

pub fn run(app: &App, method: Method, endpoint: &str, data: Option<&str>) -> Result<()> {
    let payload = parse_payload(data)?;
    let outbox = app.outbox()?;

    match block_on(outbox.submit(method, endpoint, payload))?? {
        Delivery::Sent(body) => {
            println!("Sent {method} {endpoint}");
            if !body.is_null() {
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
        }
        Delivery::Queued { id, reason } => {
            println!("Queued {method} {endpoint} as #{id} (will sync when online)");
            println!("  reason: {reason}");
        }
    }
    Ok(())
}

/// Parse the `--data` argument; absent means no body.
pub(crate) fn parse_payload(data: Option<&str>) -> Result<Value> {
    match data {
        None => Ok(Value::Null),
        Some(text) => serde_json::from_str(text).map_err(|e| Error::InvalidPayload(e.to_string())),
    }
}
