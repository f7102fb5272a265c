// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! outboxd - background sync worker for the outbox queue.
//!
//! Owns one sync session for a state directory: polls connectivity, runs a
//! pass whenever the endpoint comes back, and accepts wake requests from
//! `outbox` CLI processes over a Unix socket.
//!
//! Usage:
//!   outboxd --state-dir <path>

use std::fs;
use std::io::Write;
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ob_ipc::{framing, DaemonResponse};
use outbox::daemon::{get_lock_path, get_log_path, get_pid_path, get_socket_path};
use outbox::sync::ConnectivityMonitor;
use outbox::App;
use tokio::sync::watch;

mod server;

use server::Server;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let state_dir = match parse_state_dir(&args) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("outboxd: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = fs::create_dir_all(&state_dir) {
        eprintln!("outboxd: cannot create {}: {e}", state_dir.display());
        std::process::exit(1);
    }

    setup_logging(&get_log_path(&state_dir));

    tracing::info!("outboxd starting, state_dir={}", state_dir.display());

    let lock_file = match acquire_lock(&get_lock_path(&state_dir)) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("failed to acquire lock: {}", e);
            std::process::exit(1);
        }
    };

    let app = match App::for_state_dir(&state_dir) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    let ctx = match app.sync_context() {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("failed to open sync session: {}", e);
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    let pid_path = get_pid_path(&state_dir);
    if let Err(e) = write_pid_file(&pid_path) {
        tracing::error!("failed to write PID file: {}", e);
        std::process::exit(1);
    }

    let socket_path = get_socket_path(&state_dir);
    let _ = fs::remove_file(&socket_path);

    let listener = match UnixListener::bind(&socket_path) {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("failed to bind socket: {}", e);
            cleanup(&pid_path, &socket_path);
            std::process::exit(1);
        }
    };

    tracing::info!("listening on {}", socket_path.display());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let monitor = ConnectivityMonitor::new(app.config.poll_interval());
    let monitor_task = runtime.spawn(monitor.run(ctx.clone(), shutdown_rx));

    // Parent process waits for this line
    println!("READY");
    let _ = std::io::stdout().flush();

    let server = Server::new(ctx, runtime.handle().clone());

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
                let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));

                match framing::read_request(&mut stream) {
                    Ok(request) => {
                        let response = server.handle(request);
                        let should_shutdown = matches!(response, DaemonResponse::ShuttingDown);
                        let _ = framing::write_response(&mut stream, &response);
                        if should_shutdown {
                            tracing::info!("shutting down");
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("failed to read request: {}", e);
                    }
                }
            }
            Err(e) => {
                tracing::warn!("failed to accept connection: {}", e);
            }
        }
    }

    let _ = shutdown_tx.send(true);
    let _ = runtime.block_on(monitor_task);
    // In-flight passes get a grace period to finish their store writes
    runtime.shutdown_timeout(Duration::from_secs(5));

    cleanup(&pid_path, &socket_path);
    drop(lock_file);
    tracing::info!("outboxd stopped");
}

fn parse_state_dir(args: &[String]) -> outbox::Result<PathBuf> {
    if let Some(pos) = args.iter().position(|a| a == "--state-dir") {
        if let Some(dir) = args.get(pos + 1) {
            return Ok(PathBuf::from(dir));
        }
    }
    outbox::config::state_dir()
}

fn setup_logging(log_path: &Path) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Ok(file) = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn acquire_lock(lock_path: &Path) -> std::io::Result<fs::File> {
    use fs2::FileExt;

    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(lock_path)?;
    file.try_lock_exclusive()
        .map_err(|_| std::io::Error::other("another daemon instance is already running"))?;
    Ok(file)
}

fn write_pid_file(pid_path: &Path) -> std::io::Result<()> {
    fs::write(pid_path, format!("{}", std::process::id()))
}

fn cleanup(pid_path: &Path, socket_path: &Path) {
    let _ = fs::remove_file(pid_path);
    let _ = fs::remove_file(socket_path);
}
