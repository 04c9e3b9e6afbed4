//! Note store: CRUD and search over a storage backend.
//!
//! # Responsibility
//! - Provide the note data-access contract (list/get/create/update/delete/
//!   search) on top of any `NoteBackend`.
//! - Keep timestamp and identity rules out of backends and callers.
//!
//! # Invariants
//! - Every mutation is a whole-collection load, modify, save cycle.
//! - Not-found is an absent result (`None` / `false`), never an error.

pub mod note_store;
