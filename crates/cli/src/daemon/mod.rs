// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Background sync daemon management.
//!
//! The CLI reaches the `outboxd` daemon over a Unix socket in the state
//! directory to request background sync and query its status.

mod client;
mod lifecycle;

pub use client::DaemonClient;
pub use lifecycle::{
    detect_daemon, get_daemon_status, get_lock_path, get_log_path, get_pid_path, get_socket_path,
    spawn_daemon, stop_daemon, DaemonInfo,
};
