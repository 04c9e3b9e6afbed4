//! Substring search and recency ordering.
//!
//! # Invariants
//! - Matching is case-insensitive and never fails on user input.
//! - An empty query matches every note.
//! - Results are ordered by `updated_at DESC, id ASC`.

use crate::model::note::Note;
use std::cmp::Ordering;

/// Search options for note lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free text matched against title, content and every tag.
    pub text: String,
    /// Optional exact tag filter applied after text matching.
    pub tag: Option<String>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Filters and orders `notes` according to this query.
    pub fn apply(&self, notes: Vec<Note>) -> Vec<Note> {
        let needle = self.text.to_lowercase();
        let mut hits: Vec<Note> = notes
            .into_iter()
            .filter(|note| matches_text(note, &needle))
            .filter(|note| self.tag.as_deref().map_or(true, |tag| note.has_tag(tag)))
            .collect();
        sort_by_recency(&mut hits);
        hits
    }
}

/// Returns whether `note` contains `needle` in its title, content or tags.
///
/// `needle` must already be lowercased.
pub fn matches_text(note: &Note, needle: &str) -> bool {
    note.title.to_lowercase().contains(needle)
        || note.content.to_lowercase().contains(needle)
        || note
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Sorts notes most recently updated first, ties broken by id.
pub fn sort_by_recency(notes: &mut [Note]) {
    notes.sort_by(recency_order);
}

fn recency_order(left: &Note, right: &Note) -> Ordering {
    right
        .updated_at
        .cmp(&left.updated_at)
        .then_with(|| left.id.cmp(&right.id))
}
