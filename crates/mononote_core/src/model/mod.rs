//! Domain model for notes.
//!
//! # Responsibility
//! - Define the single persisted record (`Note`) and its editable input
//!   shape (`NoteDraft`).
//! - Own validation and timestamp rules shared by every storage backend.
//!
//! # Invariants
//! - Every note is identified by a stable, non-empty `NoteId`.
//! - `id` and `created_at` never change after creation.

pub mod note;
