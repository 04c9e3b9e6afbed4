//! Single-note export rendering.
//!
//! # Responsibility
//! - Render one note as plain text or Markdown.
//! - Derive a filesystem-safe download name from the note title.
//!
//! # Invariants
//! - Note content is embedded verbatim.
//! - Tags are joined with `", "` in stored order.

use crate::model::note::Note;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

static UNSAFE_FILE_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9]").expect("valid file name regex"));

/// Supported export formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Plain text (`.txt`).
    #[default]
    Text,
    /// Markdown (`.md`).
    Markdown,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Markdown => "md",
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Text),
            "md" | "markdown" => Ok(Self::Markdown),
            other => Err(format!(
                "unsupported export format `{other}`; expected txt|md"
            )),
        }
    }
}

/// Rendered export ready to be written or displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub body: String,
    pub format: ExportFormat,
}

/// Renders `note` in the requested format.
pub fn render_note(note: &Note, format: ExportFormat) -> String {
    let tags = note.tags.join(", ");
    match format {
        ExportFormat::Text => format!("{}\n\n{}\n\nTags: {}", note.title, note.content, tags),
        ExportFormat::Markdown => {
            format!("# {}\n\n{}\n\n**Tags:** {}", note.title, note.content, tags)
        }
    }
}

/// Title with every character outside `[A-Za-z0-9]` replaced by `_`.
///
/// One `_` is emitted per UTF-16 code unit, so characters outside the
/// Basic Multilingual Plane (emoji) become `__`.
pub fn export_file_name(title: &str, format: ExportFormat) -> String {
    let safe = UNSAFE_FILE_CHARS_RE.replace_all(title, |caps: &Captures<'_>| {
        let units: usize = caps[0].chars().map(char::len_utf16).sum();
        "_".repeat(units)
    });
    format!("{}.{}", safe, format.extension())
}

/// Builds the full export document for one note.
pub fn export_note(note: &Note, format: ExportFormat) -> ExportDocument {
    ExportDocument {
        file_name: export_file_name(&note.title, format),
        body: render_note(note, format),
        format,
    }
}

/// Writes `document` into `dir` and returns the written path.
pub fn write_export(dir: impl AsRef<Path>, document: &ExportDocument) -> io::Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&document.file_name);
    std::fs::write(&path, document.body.as_bytes())?;
    Ok(path)
}
