// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: spawn, detect, stop, cleanup.
//!
//! The daemon (outboxd) runs as a background process next to the queue
//! database. Its PID, socket, lock and log files live in the state directory.

use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use ob_ipc::DaemonStatus;
use tracing::debug;

use super::client::DaemonClient;
use crate::env;
use crate::error::{Error, Result};

const SOCKET_NAME: &str = "daemon.sock";
const PID_NAME: &str = "daemon.pid";
const LOCK_NAME: &str = "daemon.lock";
const LOG_NAME: &str = "daemon.log";
const DAEMON_BINARY: &str = "outboxd";

/// Information about a running daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonInfo {
    pub pid: u32,
}

pub fn get_socket_path(state_dir: &Path) -> PathBuf {
    state_dir.join(SOCKET_NAME)
}

pub fn get_pid_path(state_dir: &Path) -> PathBuf {
    state_dir.join(PID_NAME)
}

pub fn get_lock_path(state_dir: &Path) -> PathBuf {
    state_dir.join(LOCK_NAME)
}

pub fn get_log_path(state_dir: &Path) -> PathBuf {
    state_dir.join(LOG_NAME)
}

/// Detect a running daemon.
///
/// Returns `None` when no daemon answers a ping. Stale PID and socket files
/// left by a crashed daemon are removed.
pub fn detect_daemon(state_dir: &Path) -> Result<Option<DaemonInfo>> {
    let socket_path = get_socket_path(state_dir);
    if !socket_path.exists() {
        let _ = fs::remove_file(get_pid_path(state_dir));
        return Ok(None);
    }

    let alive = DaemonClient::connect(&socket_path).and_then(|mut client| client.ping());
    if let Err(e) = alive {
        debug!(error = %e, "daemon not responding, removing stale files");
        cleanup_stale_files(state_dir);
        return Ok(None);
    }

    // A missing PID file means the daemon is still starting up.
    Ok(read_pid_file(&get_pid_path(state_dir))
        .filter(|pid| *pid > 0)
        .map(|pid| DaemonInfo { pid }))
}

/// Query a running daemon's status. `None` if no daemon is running.
pub fn get_daemon_status(state_dir: &Path) -> Result<Option<DaemonStatus>> {
    let socket_path = get_socket_path(state_dir);
    if !socket_path.exists() {
        return Ok(None);
    }
    match DaemonClient::connect(&socket_path) {
        Ok(mut client) => client.status().map(Some),
        Err(_) => {
            cleanup_stale_files(state_dir);
            Ok(None)
        }
    }
}

/// Locate the outboxd binary: `OUTBOX_DAEMON_BINARY`, next to the current
/// executable, then `PATH`.
fn find_daemon_binary() -> PathBuf {
    if let Some(path) = env::daemon_binary() {
        return path;
    }
    if let Ok(exe) = std::env::current_exe() {
        let sibling = exe.with_file_name(DAEMON_BINARY);
        if sibling.exists() {
            return sibling;
        }
    }
    PathBuf::from(DAEMON_BINARY)
}

/// Spawn the daemon for `state_dir`, or return the one already running.
pub fn spawn_daemon(state_dir: &Path) -> Result<DaemonInfo> {
    if let Some(info) = detect_daemon(state_dir)? {
        return Ok(info);
    }
    fs::create_dir_all(state_dir)?;

    let binary = find_daemon_binary();
    let mut child = Command::new(&binary)
        .arg("--state-dir")
        .arg(state_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            Error::Daemon(format!("failed to start {}: {e}", binary.display()))
        })?;

    // The daemon prints READY once its socket is bound.
    if let Some(stdout) = child.stdout.take() {
        let ready = BufReader::new(stdout)
            .lines()
            .map_while(|line| line.ok())
            .any(|line| line == "READY");
        debug!(ready, "daemon handshake finished");
    }

    let deadline = Instant::now() + Duration::from_millis(1500);
    while Instant::now() < deadline {
        if let Ok(Some(status)) = child.try_wait() {
            let mut stderr = String::new();
            if let Some(mut pipe) = child.stderr.take() {
                let _ = pipe.read_to_string(&mut stderr);
            }
            return Err(Error::Daemon(format!(
                "daemon exited with {status}\n{}",
                stderr.trim()
            )));
        }
        if let Some(info) = detect_daemon(state_dir)? {
            return Ok(info);
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    Err(Error::Daemon(
        "daemon failed to start: socket never became reachable".to_string(),
    ))
}

/// Stop the daemon: graceful shutdown first, SIGKILL if it does not answer.
///
/// Returns false when no daemon was running.
pub fn stop_daemon(state_dir: &Path) -> Result<bool> {
    let socket_path = get_socket_path(state_dir);
    let pid = read_pid_file(&get_pid_path(state_dir));
    if !socket_path.exists() && pid.is_none() {
        return Ok(false);
    }

    let graceful = DaemonClient::connect(&socket_path).and_then(|mut client| client.shutdown());
    match (graceful, pid) {
        (Ok(()), Some(pid)) => wait_for_process_exit(pid, Duration::from_secs(1)),
        (Ok(()), None) => {}
        (Err(e), Some(pid)) => {
            debug!(error = %e, pid, "graceful shutdown failed, killing daemon");
            let _ = Command::new("kill").arg("-9").arg(pid.to_string()).output();
            std::thread::sleep(Duration::from_millis(100));
        }
        (Err(_), None) => {
            cleanup_stale_files(state_dir);
            return Ok(false);
        }
    }

    cleanup_stale_files(state_dir);
    Ok(true)
}

fn cleanup_stale_files(state_dir: &Path) {
    let _ = fs::remove_file(get_socket_path(state_dir));
    let _ = fs::remove_file(get_pid_path(state_dir));
}

fn read_pid_file(pid_path: &Path) -> Option<u32> {
    fs::read_to_string(pid_path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

fn wait_for_process_exit(pid: u32, timeout: Duration) {
    let start = Instant::now();
    while start.elapsed() < timeout {
        match Command::new("kill").arg("-0").arg(pid.to_string()).output() {
            Ok(output) if output.status.success() => {}
            _ => return,
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}
