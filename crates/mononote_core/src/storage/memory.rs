//! In-memory backend.
//!
//! Holds the serialized payload in process memory, so it exercises the same
//! codec as the durable backends. Nothing survives the process.

use super::{NoteBackend, StorageResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    payload: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the backend with an already-serialized payload.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }

    /// Returns the raw payload currently stored.
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl NoteBackend for MemoryBackend {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn read_raw(&self) -> StorageResult<Option<String>> {
        Ok(self.payload.clone())
    }

    fn write_raw(&mut self, payload: &str) -> StorageResult<()> {
        self.payload = Some(payload.to_string());
        Ok(())
    }
}
