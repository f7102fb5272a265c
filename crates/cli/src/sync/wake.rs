// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Background wake registration.

use std::path::PathBuf;

use crate::daemon::{get_socket_path, DaemonClient};
use crate::error::{Error, Result};

/// Asks something outside the current process to run a sync pass later.
pub trait WakeRegistrar: Send + Sync {
    fn register(&self, tag: &str) -> Result<()>;
}

/// Wakes the outboxd daemon serving a state directory.
#[derive(Debug, Clone)]
pub struct DaemonWake {
    state_dir: PathBuf,
}

impl DaemonWake {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        DaemonWake {
            state_dir: state_dir.into(),
        }
    }
}

impl WakeRegistrar for DaemonWake {
    fn register(&self, tag: &str) -> Result<()> {
        let socket = get_socket_path(&self.state_dir);
        if !socket.exists() {
            return Err(Error::Daemon(
                "daemon is not running\n  hint: start it with `outbox daemon start`".into(),
            ));
        }
        DaemonClient::connect(&socket)?.wake(tag)
    }
}

/// Registrar for environments without background sync.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoWake;

impl WakeRegistrar for NoWake {
    fn register(&self, _tag: &str) -> Result<()> {
        Err(Error::Daemon("background sync is not available".into()))
    }
}
