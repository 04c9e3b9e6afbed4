//! Storage port and its backends.
//!
//! # Responsibility
//! - Define the `NoteBackend` port: one serialized note collection under a
//!   single storage key.
//! - Own the collection codec so every backend shares load/save semantics.
//!
//! # Invariants
//! - Saves always rewrite the whole collection.
//! - Missing data loads as an empty collection.
//! - A payload that is not a JSON array is logged and loads as empty.
//! - Records that fail to decode are skipped on read, and every write is
//!   refused while any such record remains, so they are never overwritten.
//! - Transport failures (I/O, SQLite) surface as `StorageError`.

use crate::db::DbError;
use crate::model::note::Note;
use log::{error, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;
mod memory;
mod sqlite;

pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

/// Key under which the serialized collection is stored.
pub const STORAGE_KEY: &str = "mononote_notes";

pub type StorageResult<T> = Result<T, StorageError>;

/// Backend transport or codec failure.
#[derive(Debug)]
pub enum StorageError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Db(DbError),
    Serialize(serde_json::Error),
    /// Stored records that cannot be decoded; writing would discard them.
    UnreadableRecords { backend: String, count: usize },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "storage i/o failed at `{}`: {source}", path.display())
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize notes: {err}"),
            Self::UnreadableRecords { backend, count } => write!(
                f,
                "{count} stored note record(s) in `{backend}` cannot be read; refusing to overwrite them"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::UnreadableRecords { .. } => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key/value persistence port for the note collection.
///
/// Implementors only move raw payloads; decoding lives in the provided
/// `load`/`save` methods.
pub trait NoteBackend {
    /// Short backend label for diagnostics, e.g. `json:/path/to/dir`.
    fn describe(&self) -> String;

    /// Reads the raw payload stored under [`STORAGE_KEY`], if any.
    fn read_raw(&self) -> StorageResult<Option<String>>;

    /// Replaces the raw payload stored under [`STORAGE_KEY`].
    fn write_raw(&mut self, payload: &str) -> StorageResult<()>;

    /// Loads every readable note in stored order.
    fn load(&self) -> StorageResult<Vec<Note>> {
        Ok(self.load_decoded()?.notes)
    }

    /// Loads the collection for a read-modify-write cycle.
    ///
    /// # Errors
    /// - `UnreadableRecords` when any stored record fails to decode.
    fn load_for_write(&self) -> StorageResult<Vec<Note>> {
        let decoded = self.load_decoded()?;
        if decoded.unreadable > 0 {
            let backend = self.describe();
            error!(
                "event=storage_load module=storage status=error backend={backend} error_code=unreadable_records count={}",
                decoded.unreadable
            );
            return Err(StorageError::UnreadableRecords {
                backend,
                count: decoded.unreadable,
            });
        }
        Ok(decoded.notes)
    }

    /// Decodes the stored payload record by record.
    fn load_decoded(&self) -> StorageResult<DecodedCollection> {
        match self.read_raw()? {
            Some(payload) => Ok(decode_collection(&payload, &self.describe())),
            None => Ok(DecodedCollection::default()),
        }
    }

    /// Serializes and writes the whole collection.
    fn save(&mut self, notes: &[Note]) -> StorageResult<()> {
        let payload = serde_json::to_string(notes).map_err(|err| {
            error!(
                "event=storage_save module=storage status=error backend={} error_code=serialize_failed error={err}",
                self.describe()
            );
            StorageError::Serialize(err)
        })?;
        self.write_raw(&payload)
    }
}

impl<B: NoteBackend + ?Sized> NoteBackend for Box<B> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn read_raw(&self) -> StorageResult<Option<String>> {
        (**self).read_raw()
    }

    fn write_raw(&mut self, payload: &str) -> StorageResult<()> {
        (**self).write_raw(payload)
    }
}

/// Result of decoding a stored payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedCollection {
    /// Records that decoded, in stored order.
    pub notes: Vec<Note>,
    /// Records that are present but cannot be decoded.
    pub unreadable: usize,
}

/// Decodes a stored payload.
///
/// A payload that is not a JSON array counts as "no data". Inside an array
/// each record is decoded on its own; failures are counted, not dropped
/// silently.
fn decode_collection(payload: &str, backend: &str) -> DecodedCollection {
    if payload.trim().is_empty() {
        return DecodedCollection::default();
    }

    let records: Vec<Value> = match serde_json::from_str(payload) {
        Ok(records) => records,
        Err(err) => {
            error!(
                "event=storage_load module=storage status=error backend={backend} error_code=decode_failed error={err}"
            );
            return DecodedCollection::default();
        }
    };

    let mut decoded = DecodedCollection::default();
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Note>(record) {
            Ok(note) => decoded.notes.push(note),
            Err(err) => {
                warn!(
                    "event=storage_load module=storage status=partial backend={backend} record_index={index} error={err}"
                );
                decoded.unreadable += 1;
            }
        }
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::decode_collection;

    #[test]
    fn decode_treats_garbage_as_empty() {
        for payload in ["{not json", "   ", "{\"id\":\"x\"}"] {
            let decoded = decode_collection(payload, "test");
            assert!(decoded.notes.is_empty());
            assert_eq!(decoded.unreadable, 0);
        }
    }

    #[test]
    fn decode_keeps_readable_records_and_counts_the_rest() {
        let payload = r#"[
            {"id":"a","title":"kept","createdAt":"2026-01-01T00:00:00.000Z","updatedAt":"2026-01-01T00:00:00.000Z"},
            {"id":"b","title":"bad date","createdAt":"Thu Jan 01 2026","updatedAt":"2026-01-01T00:00:00.000Z"},
            {"id":"c","title":"older update","createdAt":"2026-02-01T00:00:00.000Z","updatedAt":"2026-01-01T00:00:00.000Z"}
        ]"#;
        let decoded = decode_collection(payload, "test");
        let ids: Vec<&str> = decoded.notes.iter().map(|note| note.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(decoded.unreadable, 1);
    }

    #[test]
    fn decode_fills_missing_content_and_tags() {
        let payload = r#"[{"id":"a","title":"t","createdAt":"2026-01-01T00:00:00Z","updatedAt":"2026-01-01T00:00:00Z"}]"#;
        let notes = decode_collection(payload, "test").notes;
        assert_eq!(notes.len(), 1);
        assert!(notes[0].content.is_empty());
        assert!(notes[0].tags.is_empty());
    }
}
