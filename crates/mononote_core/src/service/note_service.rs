//! Note editor use-case service.
//!
//! # Responsibility
//! - Implement the editor "save" flow: create without a selection, update
//!   with one.
//! - Normalize editor input (trimmed title/content, trimmed unique tags).
//! - Provide tag filtering and export on top of the store.
//!
//! # Invariants
//! - A blank title is rejected before any store call.
//! - Tag filter `None` means "all notes".

use crate::export::{export_note, ExportDocument, ExportFormat};
use crate::model::note::{Note, NoteDraft, NoteId};
use crate::search::substring::SearchQuery;
use crate::storage::NoteBackend;
use crate::store::note_store::{NoteStore, StoreError, StoreResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for editor use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Selected note does not exist.
    NoteNotFound(NoteId),
    /// Store or backend failure.
    Store(StoreError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "please enter a title"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Outcome of [`NoteService::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(Note),
    Updated(Note),
}

impl SaveOutcome {
    pub fn note(&self) -> &Note {
        match self {
            Self::Created(note) | Self::Updated(note) => note,
        }
    }

    pub fn into_note(self) -> Note {
        match self {
            Self::Created(note) | Self::Updated(note) => note,
        }
    }
}

/// Editor-facing facade over a note store.
pub struct NoteService<B: NoteBackend> {
    store: NoteStore<B>,
}

impl<B: NoteBackend> NoteService<B> {
    pub fn new(store: NoteStore<B>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &NoteStore<B> {
        &self.store
    }

    /// Saves editor input.
    ///
    /// # Contract
    /// - Title and content are trimmed; tags are stored as given.
    /// - `selection = None` creates a note; `Some(id)` updates it.
    ///
    /// # Errors
    /// - `EmptyTitle` when the trimmed title is empty.
    /// - `NoteNotFound` when the selected note no longer exists.
    pub fn save(
        &mut self,
        selection: Option<&NoteId>,
        draft: NoteDraft,
    ) -> Result<SaveOutcome, NoteServiceError> {
        let draft = NoteDraft {
            title: draft.title.trim().to_string(),
            content: draft.content.trim().to_string(),
            tags: draft.tags,
        };
        if draft.title.is_empty() {
            return Err(NoteServiceError::EmptyTitle);
        }

        match selection {
            Some(id) => self
                .store
                .update(id, draft)?
                .map(SaveOutcome::Updated)
                .ok_or_else(|| NoteServiceError::NoteNotFound(id.clone())),
            None => Ok(SaveOutcome::Created(self.store.create(draft)?)),
        }
    }

    pub fn get(&self, id: &NoteId) -> StoreResult<Option<Note>> {
        self.store.get(id)
    }

    pub fn delete(&mut self, id: &NoteId) -> StoreResult<bool> {
        self.store.delete(id)
    }

    /// Lists notes, optionally restricted to one exact tag.
    pub fn filter(&self, tag: Option<&str>) -> StoreResult<Vec<Note>> {
        match tag {
            Some(tag) => self.store.list_by_tag(tag),
            None => self.store.list(),
        }
    }

    /// Text search with an optional exact tag filter.
    pub fn search(&self, text: &str, tag: Option<&str>) -> StoreResult<Vec<Note>> {
        let mut query = SearchQuery::new(text);
        query.tag = tag.map(str::to_string);
        self.store.query(&query)
    }

    pub fn all_tags(&self) -> StoreResult<Vec<String>> {
        self.store.list_tags()
    }

    /// Renders one note for export.
    pub fn export(
        &self,
        id: &NoteId,
        format: ExportFormat,
    ) -> Result<ExportDocument, NoteServiceError> {
        let note = self
            .store
            .get(id)?
            .ok_or_else(|| NoteServiceError::NoteNotFound(id.clone()))?;
        Ok(export_note(&note, format))
    }
}

/// Appends a trimmed tag unless it is blank or already present.
pub fn add_tag(tags: &[String], input: &str) -> Vec<String> {
    let mut next = tags.to_vec();
    let trimmed = input.trim();
    if !trimmed.is_empty() && !next.iter().any(|tag| tag == trimmed) {
        next.push(trimmed.to_string());
    }
    next
}

/// Removes every exact occurrence of `tag`.
pub fn remove_tag(tags: &[String], tag: &str) -> Vec<String> {
    tags.iter()
        .filter(|current| current.as_str() != tag)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{add_tag, remove_tag};

    #[test]
    fn add_tag_trims_and_skips_duplicates() {
        let tags = add_tag(&[], "  work ");
        assert_eq!(tags, vec!["work".to_string()]);
        assert_eq!(add_tag(&tags, "work"), tags);
        assert_eq!(add_tag(&tags, "   "), tags);
        assert_eq!(add_tag(&tags, "Work").len(), 2);
    }

    #[test]
    fn remove_tag_drops_exact_matches_only() {
        let tags = vec!["a".to_string(), "A".to_string(), "a".to_string()];
        assert_eq!(remove_tag(&tags, "a"), vec!["A".to_string()]);
    }
}
