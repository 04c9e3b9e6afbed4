//! Command execution against a note service.
//!
//! Every command writes its result to the provided writer so the same code
//! path serves the terminal and tests.

use crate::cli::Command;
use anyhow::{anyhow, bail, Context, Result};
use log::info;
use mononote_core::{
    add_tag, remove_tag, write_export, Note, NoteBackend, NoteDraft, NoteId, NoteService,
};
use serde_json::json;
use std::io::Write;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Plain,
    Json,
}

pub fn execute<B, W>(
    service: &mut NoteService<B>,
    command: Command,
    mode: OutputMode,
    out: &mut W,
) -> Result<()>
where
    B: NoteBackend,
    W: Write,
{
    match command {
        Command::New {
            title,
            content,
            tags,
        } => {
            let tags = tags.iter().fold(Vec::new(), |acc, tag| add_tag(&acc, tag));
            let draft = NoteDraft::new(title).with_content(content).with_tags(tags);
            let note = service.save(None, draft)?.into_note();
            info!("event=cli_command module=cli status=ok command=new");
            print_note(out, &note, mode)
        }
        Command::List { tag } => {
            let notes = service.filter(tag.as_deref())?;
            print_notes(out, &notes, mode)
        }
        Command::Show { id } => {
            let id = NoteId::from(id);
            let note = service
                .get(&id)?
                .ok_or_else(|| anyhow!("note not found: {id}"))?;
            print_note(out, &note, mode)
        }
        Command::Edit {
            id,
            title,
            content,
            tags,
            untags,
            clear_tags,
        } => {
            let id = NoteId::from(id);
            let existing = service
                .get(&id)?
                .ok_or_else(|| anyhow!("note not found: {id}"))?;

            let mut draft = existing.draft();
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(content) = content {
                draft.content = content;
            }
            if clear_tags {
                draft.tags.clear();
            }
            for tag in &untags {
                draft.tags = remove_tag(&draft.tags, tag);
            }
            for tag in &tags {
                draft.tags = add_tag(&draft.tags, tag);
            }

            let note = service.save(Some(&id), draft)?.into_note();
            info!("event=cli_command module=cli status=ok command=edit");
            print_note(out, &note, mode)
        }
        Command::Delete { id } => {
            let id = NoteId::from(id);
            if !service.delete(&id)? {
                bail!("note not found: {id}");
            }
            match mode {
                OutputMode::Json => writeln!(
                    out,
                    "{}",
                    serde_json::to_string_pretty(&json!({ "deleted": id.as_str() }))?
                )?,
                OutputMode::Plain => writeln!(out, "deleted {id}")?,
            }
            Ok(())
        }
        Command::Search { query, tag } => {
            let notes = service.search(&query, tag.as_deref())?;
            print_notes(out, &notes, mode)
        }
        Command::Tags => {
            let tags = service.all_tags()?;
            match mode {
                OutputMode::Json => writeln!(out, "{}", serde_json::to_string_pretty(&tags)?)?,
                OutputMode::Plain => {
                    for tag in tags {
                        writeln!(out, "{tag}")?;
                    }
                }
            }
            Ok(())
        }
        Command::Export {
            id,
            format,
            out: target_dir,
        } => {
            let document = service.export(&NoteId::from(id), format)?;
            let written = match target_dir {
                Some(dir) => {
                    let path = write_export(&dir, &document).with_context(|| {
                        format!("failed to write export into `{}`", dir.display())
                    })?;
                    info!("event=cli_command module=cli status=ok command=export format={format}");
                    Some(path)
                }
                None => None,
            };

            match (mode, written) {
                (OutputMode::Json, path) => {
                    let payload = json!({
                        "fileName": document.file_name,
                        "format": document.format.extension(),
                        "body": document.body,
                        "path": path.map(|path| path.display().to_string()),
                    });
                    writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
                }
                (OutputMode::Plain, Some(path)) => writeln!(out, "exported {}", path.display())?,
                (OutputMode::Plain, None) => writeln!(out, "{}", document.body)?,
            }
            Ok(())
        }
    }
}

fn print_note<W: Write>(out: &mut W, note: &Note, mode: OutputMode) -> Result<()> {
    match mode {
        OutputMode::Json => writeln!(out, "{}", serde_json::to_string_pretty(note)?)?,
        OutputMode::Plain => {
            writeln!(out, "{}", summary_line(note))?;
            if !note.content.is_empty() {
                writeln!(out)?;
                writeln!(out, "{}", note.content)?;
            }
        }
    }
    Ok(())
}

fn print_notes<W: Write>(out: &mut W, notes: &[Note], mode: OutputMode) -> Result<()> {
    match mode {
        OutputMode::Json => writeln!(out, "{}", serde_json::to_string_pretty(notes)?)?,
        OutputMode::Plain if notes.is_empty() => writeln!(out, "no notes")?,
        OutputMode::Plain => {
            for note in notes {
                writeln!(out, "{}", summary_line(note))?;
            }
        }
    }
    Ok(())
}

fn summary_line(note: &Note) -> String {
    let updated = note.updated_at.format("%Y-%m-%d %H:%M");
    if note.tags.is_empty() {
        format!("{}  {}  {}", note.id, updated, note.title)
    } else {
        format!(
            "{}  {}  {}  [{}]",
            note.id,
            updated,
            note.title,
            note.tags.join(", ")
        )
    }
}
