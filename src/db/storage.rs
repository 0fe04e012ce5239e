//! Durable key/value storage.
//!
//! Every persisted field of the converter (amount fields, rates, history log,
//! view configuration) is a string under a fixed key. Values are read once
//! when the state is mounted and rewritten whole on every change.

use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use rusqlite::{OptionalExtension, params};
use std::collections::HashMap;

pub const KEY_SAR_AMOUNT: &str = "sarAmount";
pub const KEY_SDG_AMOUNT: &str = "sdgAmount";
pub const KEY_SAR_TO_SDG_RATE: &str = "sarToSdgRate";
pub const KEY_SDG_TO_SAR_RATE: &str = "sdgToSarRate";
pub const KEY_HISTORY: &str = "conversionHistory";
pub const KEY_HISTORY_FILTER: &str = "historyFilter";
pub const KEY_HISTORY_SORT: &str = "historySort";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;

    /// Record an operation in the internal log, if the backend keeps one.
    fn record(&self, _operation: &str, _target: &str, _message: &str) {}
}

/// SQLite-backed store (`storage` table).
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn open(path: &str) -> AppResult<Self> {
        Ok(Self::new(DbPool::new(path)?))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let value = self
            .pool
            .conn
            .query_row("SELECT value FROM storage WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.pool.conn.execute(
            "INSERT INTO storage (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }

    fn record(&self, operation: &str, target: &str, message: &str) {
        ttlog_soft(&self.pool.conn, operation, target, message);
    }
}

/// Volatile store, used by tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys written so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
