//! Note store over a pluggable backend.
//!
//! # Invariants
//! - `list`, `search` and `list_by_tag` return `updated_at DESC, id ASC`.
//! - `create` assigns a fresh id with `created_at == updated_at`.
//! - `update` keeps `id`/`created_at` and never moves `updated_at` back.
//! - Failed validation or missing ids never trigger a backend write.
//! - Mutations are refused while the backend holds unreadable records.

use crate::model::note::{now_millis, Note, NoteDraft, NoteId, NoteValidationError};
use crate::search::substring::{sort_by_recency, SearchQuery};
use crate::storage::{NoteBackend, StorageError};
use log::{error, info};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure: invalid input or backend failure.
#[derive(Debug)]
pub enum StoreError {
    Validation(NoteValidationError),
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Explicitly constructed note store owning its backend.
pub struct NoteStore<B: NoteBackend> {
    backend: B,
}

impl<B: NoteBackend> NoteStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Returns all notes, most recently updated first.
    pub fn list(&self) -> StoreResult<Vec<Note>> {
        let mut notes = self.backend.load()?;
        sort_by_recency(&mut notes);
        Ok(notes)
    }

    /// Gets one note by id.
    pub fn get(&self, id: &NoteId) -> StoreResult<Option<Note>> {
        let notes = self.backend.load()?;
        Ok(notes.into_iter().find(|note| &note.id == id))
    }

    /// Creates and persists a new note.
    ///
    /// # Errors
    /// - `StoreError::Validation` when the draft title is blank.
    /// - `StoreError::Storage` when the collection cannot be persisted or
    ///   holds records that cannot be read.
    pub fn create(&mut self, draft: NoteDraft) -> StoreResult<Note> {
        draft.validate()?;
        let mut notes = self.backend.load_for_write()?;

        let mut note = Note::create(draft, now_millis())?;
        while notes.iter().any(|existing| existing.id == note.id) {
            note.id = NoteId::generate();
        }

        notes.push(note.clone());
        self.persist(&notes, "note_create")?;
        info!(
            "event=note_create module=store status=ok note_id={} tag_count={}",
            note.id,
            note.tags.len()
        );
        Ok(note)
    }

    /// Replaces title/content/tags of an existing note.
    ///
    /// Returns `Ok(None)` and writes nothing when `id` is unknown.
    pub fn update(&mut self, id: &NoteId, draft: NoteDraft) -> StoreResult<Option<Note>> {
        let mut notes = self.backend.load_for_write()?;
        let Some(index) = notes.iter().position(|note| &note.id == id) else {
            info!("event=note_update module=store status=not_found note_id={id}");
            return Ok(None);
        };

        notes[index].apply_draft(draft, now_millis())?;
        let updated = notes[index].clone();
        self.persist(&notes, "note_update")?;
        info!(
            "event=note_update module=store status=ok note_id={} tag_count={}",
            updated.id,
            updated.tags.len()
        );
        Ok(Some(updated))
    }

    /// Removes a note; returns whether anything was removed.
    pub fn delete(&mut self, id: &NoteId) -> StoreResult<bool> {
        let mut notes = self.backend.load_for_write()?;
        let Some(index) = notes.iter().position(|note| &note.id == id) else {
            info!("event=note_delete module=store status=not_found note_id={id}");
            return Ok(false);
        };

        notes.remove(index);
        self.persist(&notes, "note_delete")?;
        info!("event=note_delete module=store status=ok note_id={id}");
        Ok(true)
    }

    /// Case-insensitive substring search over title, content and tags.
    pub fn search(&self, query: &str) -> StoreResult<Vec<Note>> {
        self.query(&SearchQuery::new(query))
    }

    /// Runs a full search query, including the optional tag filter.
    pub fn query(&self, query: &SearchQuery) -> StoreResult<Vec<Note>> {
        let notes = self.backend.load()?;
        Ok(query.apply(notes))
    }

    /// Notes carrying `tag` exactly, most recently updated first.
    pub fn list_by_tag(&self, tag: &str) -> StoreResult<Vec<Note>> {
        let mut notes: Vec<Note> = self
            .backend
            .load()?
            .into_iter()
            .filter(|note| note.has_tag(tag))
            .collect();
        sort_by_recency(&mut notes);
        Ok(notes)
    }

    /// Every distinct tag across all notes, sorted ascending.
    pub fn list_tags(&self) -> StoreResult<Vec<String>> {
        let tags: BTreeSet<String> = self
            .backend
            .load()?
            .into_iter()
            .flat_map(|note| note.tags)
            .collect();
        Ok(tags.into_iter().collect())
    }

    fn persist(&mut self, notes: &[Note], event: &'static str) -> StoreResult<()> {
        self.backend.save(notes).map_err(|err| {
            error!(
                "event={event} module=store status=error backend={} error_code=save_failed error={err}",
                self.backend.describe()
            );
            StoreError::from(err)
        })
    }
}
