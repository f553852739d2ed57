//! Local document cache backed by SQLite

use crate::error::LeagueError;
use anyhow::Result;
use dirs::cache_dir;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Key/value store holding whole serialized documents.
pub struct LocalCache {
    pub(crate) conn: Connection,
}

impl LocalCache {
    /// Open the cache at its default location, creating it if needed.
    pub fn new() -> Result<Self> {
        Self::open(&Self::database_path()?)
    }

    /// Open (or create) a cache database at an explicit path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let mut cache = Self { conn };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// In-memory cache, used by tests.
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut cache = Self { conn };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// `~/.cache/softball-league/league.db`
    pub fn database_path() -> Result<PathBuf> {
        let cache_dir = cache_dir().ok_or_else(|| LeagueError::Storage {
            message: "Could not determine cache directory".to_string(),
        })?;
        Ok(cache_dir.join("softball-league").join("league.db"))
    }

    fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS documents (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn load(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM documents WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn save(&mut self, key: &str, value: &str) -> Result<()> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64;
        self.conn.execute(
            "INSERT INTO documents (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM documents WHERE key = ?", params![key])?;
        Ok(())
    }
}
