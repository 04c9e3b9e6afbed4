//! Embedded SQLite backend.
//!
//! # Responsibility
//! - Persist the serialized collection as one row of the `kv_store` table.
//!
//! # Invariants
//! - The connection is migrated before the backend is constructed.
//! - Writes upsert the single `mononote_notes` row.

use super::{NoteBackend, StorageResult, STORAGE_KEY};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

pub struct SqliteBackend {
    conn: Connection,
    location: Option<PathBuf>,
}

impl SqliteBackend {
    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        Ok(Self {
            conn: open_db(path)?,
            location: Some(path.to_path_buf()),
        })
    }

    /// Opens a private in-memory database.
    pub fn in_memory() -> StorageResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
            location: None,
        })
    }

    /// Exposes the underlying connection for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl NoteBackend for SqliteBackend {
    fn describe(&self) -> String {
        match &self.location {
            Some(path) => format!("sqlite:{}", path.display()),
            None => "sqlite::memory:".to_string(),
        }
    }

    fn read_raw(&self) -> StorageResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [STORAGE_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write_raw(&mut self, payload: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (CAST(strftime('%s', 'now') AS INTEGER) * 1000);",
            params![STORAGE_KEY, payload],
        )?;
        Ok(())
    }
}
