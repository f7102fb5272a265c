// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Durable queue of pending mutations.
//!
//! The [`MutationStore`] persists writes that could not be delivered so they
//! survive a process restart. Every operation is a single SQL statement, so
//! each one is atomic on its own; records are independent and no
//! multi-record transactions are needed.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::db::{self, parse_db, parse_json, parse_timestamp, parse_timestamp_opt};
use crate::error::{Error, Result};
use crate::mutation::{
    MutationId, MutationRequest, MutationStatus, PendingMutation, DEFAULT_MAX_RETRIES,
};

/// SQL schema for the mutation queue.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS pending_mutations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL,
    method TEXT NOT NULL,
    endpoint TEXT NOT NULL,
    payload TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    retry_count INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    last_retry_at TEXT,
    failed_at TEXT,
    last_error TEXT,
    CHECK (status IN ('pending', 'failed'))
);

CREATE INDEX IF NOT EXISTS idx_pending_mutations_status ON pending_mutations(status);
"#;

const SELECT_COLUMNS: &str = "SELECT id, url, method, endpoint, payload, status, retry_count,
        created_at, last_retry_at, failed_at, last_error
 FROM pending_mutations";

/// Aggregate view of the queue, computed from the current record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub pending: usize,
    pub failed: usize,
    pub total: usize,
}

/// SQLite-backed store of [`PendingMutation`] records keyed by id.
pub struct MutationStore {
    conn: Connection,
    max_retries: u32,
}

impl MutationStore {
    /// Open the store at the given path, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = db::open_connection(path, SCHEMA)?;
        Ok(MutationStore {
            conn,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory(SCHEMA)?;
        Ok(MutationStore {
            conn,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Override the retry budget after which a record becomes `failed`.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Persist a new pending mutation and return its id.
    pub fn save(&self, request: &MutationRequest, reason: Option<&str>) -> Result<MutationId> {
        self.conn.execute(
            "INSERT INTO pending_mutations
                 (url, method, endpoint, payload, status, retry_count, created_at, last_error)
             VALUES (?1, ?2, ?3, ?4, 'pending', 0, ?5, ?6)",
            params![
                request.url,
                request.method.as_str(),
                request.endpoint,
                serde_json::to_string(&request.payload)?,
                Utc::now().to_rfc3339(),
                reason,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, method = %request.method, url = %request.url, "mutation queued");
        Ok(id)
    }

    /// Get a single record.
    pub fn get(&self, id: MutationId) -> Result<Option<PendingMutation>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        let mutation = self
            .conn
            .query_row(&sql, params![id], row_to_mutation)
            .optional()?;
        Ok(mutation)
    }

    /// All records, in insertion order. Callers filter by status.
    pub fn get_all(&self) -> Result<Vec<PendingMutation>> {
        self.query(&format!("{SELECT_COLUMNS} ORDER BY id"), [])
    }

    /// Records still eligible for replay.
    pub fn get_pending(&self) -> Result<Vec<PendingMutation>> {
        self.query(
            &format!("{SELECT_COLUMNS} WHERE status = 'pending' ORDER BY id"),
            [],
        )
    }

    /// Set the retry count of a record.
    ///
    /// Reaching the retry budget moves the record to `failed` and stamps
    /// `failed_at` in the same statement, so `status == failed` holds exactly
    /// when `retry_count >= max_retries`.
    pub fn update_retry_count(&self, id: MutationId, new_count: u32) -> Result<PendingMutation> {
        let status = MutationStatus::for_retry_count(new_count, self.max_retries);
        let changed = self.conn.execute(
            "UPDATE pending_mutations SET
                 retry_count = ?2,
                 last_retry_at = ?3,
                 status = ?4,
                 failed_at = CASE WHEN ?4 = 'failed' THEN COALESCE(failed_at, ?3) ELSE NULL END
             WHERE id = ?1",
            params![id, new_count, Utc::now().to_rfc3339(), status.as_str()],
        )?;
        if changed == 0 {
            return Err(Error::MutationNotFound(id));
        }

        let mutation = self.get(id)?.ok_or(Error::MutationNotFound(id))?;
        if mutation.status == MutationStatus::Failed {
            tracing::warn!(id, retries = mutation.retry_count, "mutation marked as failed");
        }
        Ok(mutation)
    }

    /// Remove a delivered record. Deleting an unknown id is a no-op.
    pub fn delete(&self, id: MutationId) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM pending_mutations WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Remove every terminal record, returning how many were removed.
    pub fn purge_failed(&self) -> Result<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM pending_mutations WHERE status = 'failed'", [])?;
        Ok(removed)
    }

    /// Counts by status.
    pub fn stats(&self) -> Result<QueueStats> {
        let mut stmt = self
            .conn
            .prepare("SELECT status, COUNT(*) FROM pending_mutations GROUP BY status")?;
        let rows = stmt.query_map([], |row| {
            let status: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok((parse_db::<MutationStatus>(&status, "status")?, count))
        })?;

        let mut stats = QueueStats::default();
        for row in rows {
            let (status, count) = row?;
            let count = usize::try_from(count).unwrap_or(0);
            match status {
                MutationStatus::Pending => stats.pending = count,
                MutationStatus::Failed => stats.failed = count,
            }
        }
        stats.total = stats.pending + stats.failed;
        Ok(stats)
    }

    fn query<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<PendingMutation>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_mutation)?;
        let mut mutations = Vec::new();
        for row in rows {
            mutations.push(row?);
        }
        Ok(mutations)
    }
}

fn row_to_mutation(row: &Row<'_>) -> std::result::Result<PendingMutation, rusqlite::Error> {
    let method: String = row.get(2)?;
    let payload: String = row.get(4)?;
    let status: String = row.get(5)?;
    let created_at: String = row.get(7)?;

    Ok(PendingMutation {
        id: row.get(0)?,
        url: row.get(1)?,
        method: parse_db(&method, "method")?,
        endpoint: row.get(3)?,
        payload: parse_json(&payload, "payload")?,
        status: parse_db(&status, "status")?,
        retry_count: row.get(6)?,
        created_at: parse_timestamp(&created_at, "created_at")?,
        last_retry_at: parse_timestamp_opt(row.get(8)?, "last_retry_at")?,
        failed_at: parse_timestamp_opt(row.get(9)?, "failed_at")?,
        last_error: row.get(10)?,
    })
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
