// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod cache;
pub mod daemon;
pub mod fetch;
pub mod queue;
pub mod status;
pub mod submit;
pub mod sync;
pub mod watch;

use std::future::Future;

use crate::error::Result;

/// Run an async command body to completion on a fresh runtime.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Runtime::new()?;
    Ok(runtime.block_on(future))
}
