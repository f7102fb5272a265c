// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime configuration management.
//!
//! Configuration is stored in `outbox.toml` inside the state directory and
//! includes:
//! - `base_url`: API base URL that writes are delivered to
//! - `max_retries`: per-mutation retry budget before it is marked failed
//! - `[cache]`: shell manifest and cache generation version
//! - `[daemon]`: background daemon tuning

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};

const STATE_DIR_NAME: &str = "outbox";
const CONFIG_FILE_NAME: &str = "outbox.toml";
const QUEUE_DB_FILE_NAME: &str = "queue.db";
const CACHE_DB_FILE_NAME: &str = "cache.db";

/// Runtime configuration stored in `outbox.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// API base URL (e.g. `http://localhost:3000/api`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Retry budget: a mutation whose retry count reaches this is marked failed.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Opaque bearer token attached to every API request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub daemon: DaemonConfig,
}

/// Cache interceptor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Version tag embedded in cache generation names.
    #[serde(default = "default_cache_version")]
    pub version: String,
    /// Routes that make up the application shell (served cache-first).
    #[serde(default = "default_shell_routes")]
    pub shell_routes: Vec<String>,
    /// Origin relative request paths are resolved against.
    #[serde(default = "default_origin")]
    pub origin: String,
}

/// Background daemon configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Seconds between connectivity checks (default: 30).
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_max_retries() -> u32 {
    ob_core::DEFAULT_MAX_RETRIES
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_cache_version() -> String {
    "v1.1.0".to_string()
}

fn default_shell_routes() -> Vec<String> {
    ["/", "/index.html", "/manifest.json"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_poll_interval_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: default_base_url(),
            max_retries: default_max_retries(),
            request_timeout_secs: default_request_timeout_secs(),
            auth_token: None,
            cache: CacheConfig::default(),
            daemon: DaemonConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            version: default_cache_version(),
            shell_routes: default_shell_routes(),
            origin: default_origin(),
        }
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        DaemonConfig {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl Config {
    /// Loads configuration for a state directory.
    ///
    /// `OUTBOX_CONFIG` overrides the file location. A missing file yields the
    /// defaults.
    pub fn load(state_dir: &Path) -> Result<Self> {
        let path = env::config_path().unwrap_or_else(|| state_dir.join(CONFIG_FILE_NAME));
        Self::load_from(&path)
    }

    /// Loads configuration from an explicit path, defaulting when absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if !is_http_url(&self.base_url) {
            return Err(Error::Config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if !is_http_url(&self.cache.origin) {
            return Err(Error::Config(format!(
                "cache.origin must be an http(s) URL, got '{}'",
                self.cache.origin
            )));
        }
        if self.max_retries == 0 {
            return Err(Error::Config("max_retries must be at least 1".into()));
        }
        if self.cache.version.trim().is_empty() {
            return Err(Error::Config("cache.version must not be empty".into()));
        }
        if self.daemon.poll_interval_secs == 0 {
            return Err(Error::Config(
                "daemon.poll_interval_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// API base URL without a trailing slash.
    pub fn api_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Server origin: the base URL with a trailing `/api` segment removed.
    pub fn server_origin(&self) -> &str {
        let base = self.api_base();
        base.strip_suffix("/api").unwrap_or(base)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.daemon.poll_interval_secs)
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Resolves the state directory.
///
/// Priority: `OUTBOX_STATE_DIR`, then `$XDG_STATE_HOME/outbox`, then
/// `~/.local/state/outbox`.
pub fn state_dir() -> Result<PathBuf> {
    if let Some(dir) = env::state_dir() {
        return Ok(dir);
    }
    if let Some(xdg) = env::xdg_state_home() {
        return Ok(xdg.join(STATE_DIR_NAME));
    }
    dirs::home_dir()
        .map(|home| home.join(".local").join("state").join(STATE_DIR_NAME))
        .ok_or_else(|| Error::Config("cannot determine home directory".into()))
}

/// Path of the durable mutation queue database.
pub fn queue_db_path(state_dir: &Path) -> PathBuf {
    state_dir.join(QUEUE_DB_FILE_NAME)
}

/// Path of the response cache database.
pub fn cache_db_path(state_dir: &Path) -> PathBuf {
    state_dir.join(CACHE_DB_FILE_NAME)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
