// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! outbox - offline-first write queue and response cache.
//!
//! This crate provides the functionality behind the `outbox` CLI and the
//! `outboxd` background daemon.
//!
//! # Main Components
//!
//! - [`sync`] - write path, single-flight sync passes and their triggers
//! - [`cache`] - cache-first / network-first request interception
//! - [`remote`] - the API endpoint abstraction and its HTTP implementation
//! - [`Config`] - `outbox.toml` configuration
//! - [`Error`] - error types for all operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use outbox::{App, sync::Delivery};
//!
//! let app = App::load()?;
//! let outbox = app.outbox()?;
//! match outbox.submit(Method::Post, "/tasks", json!({"title": "buy milk"})).await? {
//!     Delivery::Sent(body) => println!("created {body}"),
//!     Delivery::Queued { id, .. } => println!("queued as #{id}"),
//! }
//! ```

mod cli;
mod commands;
pub mod daemon;

pub mod app;
pub mod blocking;
pub mod cache;
pub mod config;
pub mod env;
pub mod error;
pub mod remote;
pub mod sync;

pub use app::App;
pub use cli::{CacheCommand, Cli, Command, DaemonCommand, OutputFormat, QueueCommand};
pub use config::Config;
pub use error::{Error, Result};

use tracing_subscriber::EnvFilter;

/// Install the stderr `tracing` subscriber for CLI processes.
///
/// `RUST_LOG` wins; otherwise `debug` when verbose, `warn` by default.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run a parsed command.
pub fn run(command: Command) -> Result<()> {
    let app = App::load()?;
    match command {
        Command::Submit {
            endpoint,
            method,
            data,
        } => commands::submit::run(&app, method, &endpoint, data.as_deref()),
        Command::Sync { output } => commands::sync::run(&app, output),
        Command::Status { output } => commands::status::run(&app, output),
        Command::Queue { command } => match command {
            QueueCommand::List { failed, output } => commands::queue::list(&app, failed, output),
            QueueCommand::PurgeFailed => commands::queue::purge_failed(&app),
        },
        Command::Fetch {
            path,
            navigate,
            include,
        } => commands::fetch::run(&app, &path, navigate, include),
        Command::Cache { command } => match command {
            CacheCommand::Install => commands::cache::install(&app),
            CacheCommand::Activate => commands::cache::activate(&app),
            CacheCommand::List => commands::cache::list(&app),
        },
        Command::Daemon { command } => match command {
            DaemonCommand::Start => commands::daemon::start(&app),
            DaemonCommand::Stop => commands::daemon::stop(&app),
            DaemonCommand::Status => commands::daemon::status(&app),
            DaemonCommand::Logs { follow } => commands::daemon::logs(&app, follow),
        },
        Command::Watch => commands::watch::run(&app),
    }
}
