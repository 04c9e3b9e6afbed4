//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into editor-level use-cases (save, tag
//!   editing, filtering, export).
//! - Keep CLI/UI layers decoupled from storage details.

pub mod note_service;
