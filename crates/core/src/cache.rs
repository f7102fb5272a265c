// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent storage for named cache generations.
//!
//! A generation is a named bucket of response snapshots keyed by request
//! identity (method + URL). Generation names embed a version tag, so a new
//! release writes into fresh generations and the old ones can be dropped
//! wholesale.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::db::{self, parse_json, parse_timestamp};
use crate::error::{Error, Result};
use crate::mutation::Method;

/// SQL schema for cache generations.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS cache_generations (
    name TEXT PRIMARY KEY,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS cache_entries (
    generation TEXT NOT NULL,
    method TEXT NOT NULL,
    url TEXT NOT NULL,
    status INTEGER NOT NULL,
    headers TEXT NOT NULL,
    body BLOB NOT NULL,
    stored_at TEXT NOT NULL,
    PRIMARY KEY (generation, method, url)
);
"#;

/// Identity of a cached request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestKey {
    pub method: Method,
    pub url: String,
}

impl RequestKey {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        RequestKey {
            method,
            url: url.into(),
        }
    }

    /// Key for a GET of `url`.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }
}

/// Snapshot of a response stored in a generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub stored_at: DateTime<Utc>,
}

/// SQLite-backed set of cache generations.
pub struct CacheStorage {
    conn: Connection,
}

impl CacheStorage {
    /// Open cache storage at the given path, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(CacheStorage {
            conn: db::open_connection(path, SCHEMA)?,
        })
    }

    /// Open in-memory cache storage (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Ok(CacheStorage {
            conn: db::open_in_memory(SCHEMA)?,
        })
    }

    /// Create the generation if it does not exist yet.
    pub fn open_generation(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO cache_generations (name, created_at) VALUES (?1, ?2)",
            params![name, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Names of every stored generation, sorted.
    pub fn generation_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM cache_generations ORDER BY name")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let mut names = Vec::new();
        for row in rows {
            names.push(row?);
        }
        Ok(names)
    }

    /// Look up a response in a generation.
    pub fn lookup(&self, generation: &str, key: &RequestKey) -> Result<Option<CachedResponse>> {
        let entry = self
            .conn
            .query_row(
                "SELECT status, headers, body, stored_at FROM cache_entries
                 WHERE generation = ?1 AND method = ?2 AND url = ?3",
                params![generation, key.method.as_str(), key.url],
                |row| {
                    let headers: String = row.get(1)?;
                    let stored_at: String = row.get(3)?;
                    Ok(CachedResponse {
                        status: row.get(0)?,
                        headers: parse_json(&headers, "headers")?,
                        body: row.get(2)?,
                        stored_at: parse_timestamp(&stored_at, "stored_at")?,
                    })
                },
            )
            .optional()?;
        Ok(entry)
    }

    /// Store a response, creating the generation on first use.
    pub fn put(&self, generation: &str, key: &RequestKey, response: &CachedResponse) -> Result<()> {
        self.open_generation(generation)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO cache_entries
                 (generation, method, url, status, headers, body, stored_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                generation,
                key.method.as_str(),
                key.url,
                response.status,
                serde_json::to_string(&response.headers)?,
                response.body,
                response.stored_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Delete a generation and all its entries. Returns false if it did not exist.
    pub fn delete_generation(&self, name: &str) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM cache_entries WHERE generation = ?1",
            params![name],
        )?;
        let removed = tx.execute(
            "DELETE FROM cache_generations WHERE name = ?1",
            params![name],
        )?;
        tx.commit()?;
        Ok(removed > 0)
    }

    /// Number of entries stored in a generation.
    pub fn entry_count(&self, generation: &str) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM cache_entries WHERE generation = ?1",
            params![generation],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidGeneration(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
