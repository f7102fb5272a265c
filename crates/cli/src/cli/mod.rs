// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand, ValueEnum};
use ob_core::Method;

/// Parse an HTTP method name (case-insensitive).
fn parse_method(s: &str) -> Result<Method, String> {
    s.parse().map_err(|e: ob_core::Error| e.to_string())
}

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "outbox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline-first write queue and response cache for a REST API")]
#[command(
    long_about = "Offline-first write queue and response cache for a REST API.\n\n\
    Writes that cannot be delivered are persisted and replayed once the API is reachable \
    again. Reads go through a local cache that keeps the application shell available offline."
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Send a write to the API, queueing it if delivery fails
    #[command(after_help = "\
Examples:
  outbox submit /tasks -d '{\"title\": \"buy milk\"}'
  outbox submit /tasks/4 -X PUT -d '{\"id\": 4, \"completed\": true}'
  outbox submit /tasks/4 -X DELETE")]
    Submit {
        /// Endpoint path relative to the API base URL
        #[arg(value_parser = non_empty_string)]
        endpoint: String,

        /// HTTP method
        #[arg(short = 'X', long, default_value = "POST", value_parser = parse_method)]
        method: Method,

        /// JSON request body
        #[arg(short, long)]
        data: Option<String>,
    },

    /// Replay queued writes now
    Sync {
        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show queue, connectivity and daemon status
    Status {
        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Inspect and maintain the write queue
    Queue {
        #[command(subcommand)]
        command: QueueCommand,
    },

    /// Read a resource through the cache
    Fetch {
        /// Path (relative to the cache origin) or absolute URL
        #[arg(value_parser = non_empty_string)]
        path: String,

        /// Treat the request as a page navigation (falls back to the shell offline)
        #[arg(long)]
        navigate: bool,

        /// Print the status line and response source before the body
        #[arg(short, long)]
        include: bool,
    },

    /// Manage cache generations
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },

    /// Manage the background sync daemon
    Daemon {
        #[command(subcommand)]
        command: DaemonCommand,
    },

    /// Watch connectivity and sync whenever the API comes back (foreground)
    Watch,
}

#[derive(Subcommand)]
pub enum QueueCommand {
    /// List queued writes
    List {
        /// Only show writes that exhausted their retries
        #[arg(long)]
        failed: bool,

        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Delete writes that exhausted their retries
    PurgeFailed,
}

#[derive(Subcommand)]
pub enum CacheCommand {
    /// Pre-cache the application shell
    Install,

    /// Delete cache generations from previous versions
    Activate,

    /// List stored cache generations
    List,
}

#[derive(Subcommand)]
pub enum DaemonCommand {
    /// Start the daemon in the background
    Start,

    /// Stop the daemon
    Stop,

    /// Show daemon status
    Status,

    /// Show daemon logs
    Logs {
        /// Follow the log output
        #[arg(short, long)]
        follow: bool,
    },
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
