// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! IPC client for the outboxd daemon.

use std::os::unix::net::UnixStream;
use std::path::Path;
use std::time::Duration;

use ob_ipc::{framing, DaemonRequest, DaemonResponse, DaemonStatus};

use crate::error::{Error, Result};

/// Read/write timeout for daemon communication.
const TIMEOUT: Duration = Duration::from_secs(2);

/// A client connection to the daemon.
pub struct DaemonClient {
    stream: UnixStream,
}

impl DaemonClient {
    /// Connect to the daemon at the given socket path.
    pub fn connect(socket_path: &Path) -> Result<Self> {
        let stream = UnixStream::connect(socket_path)
            .map_err(|e| Error::Daemon(format!("failed to connect to daemon: {e}")))?;
        stream.set_read_timeout(Some(TIMEOUT))?;
        stream.set_write_timeout(Some(TIMEOUT))?;
        Ok(DaemonClient { stream })
    }

    fn request(&mut self, request: &DaemonRequest) -> Result<DaemonResponse> {
        framing::write_request(&mut self.stream, request)?;
        match framing::read_response(&mut self.stream)? {
            DaemonResponse::Error { message } => Err(Error::Daemon(message)),
            response => Ok(response),
        }
    }

    pub fn ping(&mut self) -> Result<()> {
        match self.request(&DaemonRequest::Ping)? {
            DaemonResponse::Pong => Ok(()),
            other => Err(unexpected(&other)),
        }
    }

    /// Exchange versions; returns the daemon's.
    pub fn hello(&mut self) -> Result<String> {
        let request = DaemonRequest::Hello {
            version: env!("CARGO_PKG_VERSION").to_string(),
        };
        match self.request(&request)? {
            DaemonResponse::Hello { version } => Ok(version),
            other => Err(unexpected(&other)),
        }
    }

    pub fn status(&mut self) -> Result<DaemonStatus> {
        match self.request(&DaemonRequest::Status)? {
            DaemonResponse::Status(status) => Ok(status),
            other => Err(unexpected(&other)),
        }
    }

    /// Ask the daemon to run a sync pass for `tag`.
    pub fn wake(&mut self, tag: &str) -> Result<()> {
        let request = DaemonRequest::Wake {
            tag: tag.to_string(),
        };
        match self.request(&request)? {
            DaemonResponse::WakeScheduled { .. } => Ok(()),
            other => Err(unexpected(&other)),
        }
    }

    pub fn shutdown(&mut self) -> Result<()> {
        match self.request(&DaemonRequest::Shutdown)? {
            DaemonResponse::ShuttingDown => Ok(()),
            other => Err(unexpected(&other)),
        }
    }
}

fn unexpected(response: &DaemonResponse) -> Error {
    Error::Daemon(format!("unexpected response: {response:?}"))
}
