//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record and its wire shape.
//! - Provide lifecycle helpers for create/update timestamp semantics.
//!
//! # Invariants
//! - `title` is non-empty after trimming whenever a note is validated.
//! - `updated_at` never moves backwards across mutations.
//! - Timestamps carry millisecond precision so persisted and in-memory
//!   values compare equal.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque unique note identifier.
///
/// Generated ids are UUID v4 text, but any non-empty string loaded from
/// storage is accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Validation failures for note records and drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title is empty or whitespace only.
    EmptyTitle,
    /// Identifier is empty or whitespace only.
    EmptyId,
    /// `updated_at` is earlier than `created_at`.
    UpdatedBeforeCreated,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title cannot be empty"),
            Self::EmptyId => write!(f, "note id cannot be empty"),
            Self::UpdatedBeforeCreated => {
                write!(f, "note updatedAt cannot be earlier than createdAt")
            }
        }
    }
}

impl Error for NoteValidationError {}

/// User-editable part of a note: everything except identity and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    /// Kept in caller order; duplicates are not rejected here.
    pub tags: Vec<String>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Canonical persisted note record.
///
/// Serialized with camelCase keys (`createdAt`, `updatedAt`) so stored
/// collections keep the same shape across backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a note from a draft with a freshly generated id.
    ///
    /// `created_at` and `updated_at` are both set to `now`.
    pub fn create(draft: NoteDraft, now: DateTime<Utc>) -> Result<Self, NoteValidationError> {
        Self::with_id(NoteId::generate(), draft, now)
    }

    /// Creates a note with a caller-provided id.
    ///
    /// `create` delegates here with a generated id; callers seeding a backend
    /// use it to pick deterministic ids.
    pub fn with_id(
        id: NoteId,
        draft: NoteDraft,
        now: DateTime<Utc>,
    ) -> Result<Self, NoteValidationError> {
        let now = now.trunc_subsecs(3);
        let note = Self {
            id,
            title: draft.title,
            content: draft.content,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        };
        note.validate()?;
        Ok(note)
    }

    /// Overwrites title/content/tags and refreshes `updated_at`.
    ///
    /// # Invariants
    /// - `id` and `created_at` are untouched.
    /// - `updated_at` becomes `max(now, previous updated_at)`.
    /// - On validation failure the note is left unchanged.
    pub fn apply_draft(
        &mut self,
        draft: NoteDraft,
        now: DateTime<Utc>,
    ) -> Result<(), NoteValidationError> {
        draft.validate()?;
        self.title = draft.title;
        self.content = draft.content;
        self.tags = draft.tags;
        self.updated_at = self.updated_at.max(now.trunc_subsecs(3));
        Ok(())
    }

    /// Returns the editable part of this note.
    pub fn draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Exact (case-sensitive) tag membership, as used by tag filters.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|current| current == tag)
    }

    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.is_empty() {
            return Err(NoteValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if self.updated_at < self.created_at {
            return Err(NoteValidationError::UpdatedBeforeCreated);
        }
        Ok(())
    }
}

/// Current UTC time truncated to the persisted millisecond precision.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// RFC 3339 with millisecond precision and `Z` suffix.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
