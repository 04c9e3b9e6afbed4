//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use mononote_core::ExportFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mononote")]
#[command(version)]
#[command(about = "Single-user note keeper: create, tag, search and export short notes")]
#[command(long_about = "
mononote keeps short text notes in a local store (JSON file by default,
SQLite or in-memory on request).

Example usage:
  mononote new \"Groceries\" --content \"eggs, flour\" --tag home
  mononote list --tag home
  mononote search flour
  mononote export <id> --format md --out ~/Desktop
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Storage backend: memory, json or sqlite [env: MONONOTE_BACKEND]
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Directory holding the note collection [env: MONONOTE_DATA_DIR]
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error [env: MONONOTE_LOG_LEVEL]
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Directory for rolling log files [env: MONONOTE_LOG_DIR]
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Print notes as JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new note
    New {
        /// Note title (required, trimmed)
        title: String,
        /// Note body
        #[arg(short, long, default_value = "")]
        content: String,
        /// Tag to attach; repeat for several tags
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// List notes, most recently updated first
    List {
        /// Only show notes carrying this exact tag
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Show one note
    Show { id: String },
    /// Edit an existing note
    Edit {
        id: String,
        /// Replace the title
        #[arg(long)]
        title: Option<String>,
        /// Replace the body
        #[arg(short, long)]
        content: Option<String>,
        /// Add a tag; repeat for several tags
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Remove a tag; repeat for several tags
        #[arg(long = "untag")]
        untags: Vec<String>,
        /// Drop all existing tags before adding new ones
        #[arg(long)]
        clear_tags: bool,
    },
    /// Delete a note
    Delete { id: String },
    /// Case-insensitive search over titles, bodies and tags
    Search {
        query: String,
        /// Only keep hits carrying this exact tag
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// List every tag in use
    Tags,
    /// Export one note as plain text or Markdown
    Export {
        id: String,
        /// Output format: txt or md
        #[arg(short, long, default_value = "txt", value_parser = parse_export_format)]
        format: ExportFormat,
        /// Write the export into this directory instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn parse_export_format(value: &str) -> Result<ExportFormat, String> {
    value.parse()
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;
    use mononote_core::ExportFormat;

    #[test]
    fn parses_repeated_tags_and_global_flags() {
        let cli = Cli::try_parse_from([
            "mononote", "new", "Title", "--tag", "a", "-t", "b", "--backend", "memory", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.backend.as_deref(), Some("memory"));
        assert_eq!(
            cli.command,
            Command::New {
                title: "Title".to_string(),
                content: String::new(),
                tags: vec!["a".to_string(), "b".to_string()],
            }
        );
    }

    #[test]
    fn export_format_defaults_to_text_and_rejects_unknown() {
        let cli = Cli::try_parse_from(["mononote", "export", "abc"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Export {
                format: ExportFormat::Text,
                out: None,
                ..
            }
        ));

        assert!(Cli::try_parse_from(["mononote", "export", "abc", "--format", "pdf"]).is_err());
    }
}
