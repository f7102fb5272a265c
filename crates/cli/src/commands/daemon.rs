// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon management commands.

use crate::app::App;
use crate::daemon;
use crate::error::{Error, Result};

pub fn status(app: &App) -> Result<()> {
    match daemon::get_daemon_status(app.state_dir()) {
        Ok(Some(status)) => {
            println!("Status: running");
            println!("PID: {}", status.pid);
            println!("Uptime: {}s", status.uptime_secs);
            println!("Online: {}", status.online);
            println!("Syncing: {}", status.syncing);
            println!("Passes: {}", status.passes);
        }
        Ok(None) => println!("Status: not running"),
        Err(e) => println!("Status: error ({e})"),
    }
    Ok(())
}

pub fn start(app: &App) -> Result<()> {
    if let Some(info) = daemon::detect_daemon(app.state_dir())? {
        println!("Daemon is already running (PID: {})", info.pid);
        return Ok(());
    }
    let info = daemon::spawn_daemon(app.state_dir())
        .map_err(|e| Error::Daemon(format!("failed to start daemon: {e}")))?;
    println!("Daemon started (PID: {})", info.pid);
    Ok(())
}

pub fn stop(app: &App) -> Result<()> {
    if daemon::stop_daemon(app.state_dir())? {
        println!("Daemon stopped.");
    } else {
        println!("Daemon is not running.");
    }
    Ok(())
}

pub fn logs(app: &App, follow: bool) -> Result<()> {
    let log_path = daemon::get_log_path(app.state_dir());
    if !log_path.exists() {
        println!("No daemon logs found at {}", log_path.display());
        return Ok(());
    }

    if follow {
        let status = std::process::Command::new("tail")
            .arg("-f")
            .arg(&log_path)
            .status()?;
        if !status.success() {
            return Err(Error::Io(std::io::Error::other("tail command failed")));
        }
    } else {
        print!("{}", std::fs::read_to_string(&log_path)?);
    }
    Ok(())
}
