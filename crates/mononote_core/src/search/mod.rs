//! In-memory search over note collections.
//!
//! # Responsibility
//! - Case-insensitive substring matching over title, content and tags.
//! - The canonical recency ordering shared by list and search results.

pub mod substring;
