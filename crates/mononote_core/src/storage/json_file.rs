//! JSON file backend.
//!
//! # Invariants
//! - The collection lives in `<dir>/mononote_notes.json`.
//! - A missing file is "no data"; the directory is created on first save.

use super::{NoteBackend, StorageError, StorageResult, STORAGE_KEY};
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Stores the collection inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NoteBackend for JsonFileBackend {
    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }

    fn read_raw(&self) -> StorageResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    "event=storage_load module=storage status=empty backend=json reason=missing_file"
                );
                Ok(None)
            }
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write_raw(&mut self, payload: &str) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, payload).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
