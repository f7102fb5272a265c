// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared IPC protocol for CLI-daemon communication.
//!
//! This crate defines the message types and framing protocol used between
//! the `outbox` CLI and the `outboxd` background worker. Messages are
//! serialized as JSON with length-prefixed framing.

use serde::{Deserialize, Serialize};

/// Tag used when the write path asks for a background synchronization pass.
pub const BACKGROUND_SYNC_TAG: &str = "background-sync";

/// Request sent from CLI to daemon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum DaemonRequest {
    /// Get daemon status.
    Status,
    /// Graceful shutdown.
    Shutdown,
    /// Ping to check if daemon is alive.
    Ping,
    /// Version handshake request.
    Hello { version: String },
    /// Ask the daemon to run a synchronization pass in the background.
    Wake { tag: String },
}

impl DaemonRequest {
    /// A wake request for the standard background sync tag.
    pub fn background_sync() -> Self {
        DaemonRequest::Wake {
            tag: BACKGROUND_SYNC_TAG.to_string(),
        }
    }
}

/// Response sent from daemon to CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum DaemonResponse {
    /// Status response.
    Status(DaemonStatus),
    /// Shutdown acknowledged.
    ShuttingDown,
    /// Pong response.
    Pong,
    /// Version handshake response.
    Hello { version: String },
    /// A pass was scheduled (it may be skipped if one is already running).
    WakeScheduled { tag: String },
    /// Error response.
    Error { message: String },
}

/// Status information about the running daemon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaemonStatus {
    /// Current daemon PID.
    pub pid: u32,
    /// Uptime in seconds.
    pub uptime_secs: u64,
    /// Last known connectivity to the remote endpoint.
    #[serde(default)]
    pub online: bool,
    /// Whether a synchronization pass is running right now.
    #[serde(default)]
    pub syncing: bool,
    /// Number of passes completed since start.
    #[serde(default)]
    pub passes: u64,
}

impl DaemonStatus {
    /// Create a new status with the given parameters.
    pub fn new(pid: u32, uptime_secs: u64) -> Self {
        Self {
            pid,
            uptime_secs,
            online: false,
            syncing: false,
            passes: 0,
        }
    }

    /// Attach the sync session state.
    pub fn with_sync(mut self, online: bool, syncing: bool, passes: u64) -> Self {
        self.online = online;
        self.syncing = syncing;
        self.passes = passes;
        self
    }
}

/// Length-prefixed framing for IPC messages.
pub mod framing {
    use std::io::{Read, Write};

    use serde::de::DeserializeOwned;
    use serde::Serialize;

    use super::{DaemonRequest, DaemonResponse};

    /// Maximum message size (1MB) to prevent malformed messages from causing hangs.
    const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

    /// Write a serializable message to the given writer.
    pub fn write_message<W: Write, T: Serialize>(
        writer: &mut W,
        message: &T,
    ) -> std::io::Result<()> {
        let json = serde_json::to_vec(message)
            .map_err(|e| std::io::Error::other(format!("serialize error: {}", e)))?;
        let len =
            u32::try_from(json.len()).map_err(|_| std::io::Error::other("message too large"))?;
        writer.write_all(&len.to_be_bytes())?;
        writer.write_all(&json)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a deserializable message from the given reader.
    pub fn read_message<R: Read, T: DeserializeOwned>(reader: &mut R) -> std::io::Result<T> {
        let mut len_buf = [0u8; 4];
        reader.read_exact(&mut len_buf)?;
        let len = u32::from_be_bytes(len_buf) as usize;

        if len > MAX_MESSAGE_SIZE {
            return Err(std::io::Error::other(format!(
                "message too large: {} bytes (max {})",
                len, MAX_MESSAGE_SIZE
            )));
        }

        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf)?;

        serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::other(format!("deserialize error: {}", e)))
    }

    pub fn write_request<W: Write>(writer: &mut W, request: &DaemonRequest) -> std::io::Result<()> {
        write_message(writer, request)
    }

    pub fn read_request<R: Read>(reader: &mut R) -> std::io::Result<DaemonRequest> {
        read_message(reader)
    }

    pub fn write_response<W: Write>(
        writer: &mut W,
        response: &DaemonResponse,
    ) -> std::io::Result<()> {
        write_message(writer, response)
    }

    pub fn read_response<R: Read>(reader: &mut R) -> std::io::Result<DaemonResponse> {
        read_message(reader)
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
