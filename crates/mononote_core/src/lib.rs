//! Core domain logic for MonoNote.
//! This crate is the single source of truth for note invariants.

pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod storage;
pub mod store;

pub use config::{BackendKind, ConfigError, StoreConfig};
pub use export::{
    export_file_name, export_note, render_note, write_export, ExportDocument, ExportFormat,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{now_millis, Note, NoteDraft, NoteId, NoteValidationError};
pub use search::substring::SearchQuery;
pub use service::note_service::{add_tag, remove_tag, NoteService, NoteServiceError, SaveOutcome};
pub use storage::{
    DecodedCollection, JsonFileBackend, MemoryBackend, NoteBackend, SqliteBackend, StorageError,
    StorageResult, STORAGE_KEY,
};
pub use store::note_store::{NoteStore, StoreError, StoreResult};
