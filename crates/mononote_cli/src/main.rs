//! `mononote` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration (defaults, environment, flags) and open the
//!   configured backend.
//! - Report failures as one stderr line and a non-zero exit status.

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use commands::{execute, OutputMode};
use mononote_core::{init_logging, NoteService, NoteStore, StoreConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    // Logging is diagnostic only; a broken log dir must not block note edits.
    if let Err(err) = init_logging(&config.log_level, config.resolved_log_dir()) {
        eprintln!("warning: logging disabled: {err}");
    }
    log::info!(
        "event=cli_start module=cli status=ok backend={}",
        config.backend
    );

    let backend = config
        .open_backend()
        .context("failed to open note storage")?;
    let mut service = NoteService::new(NoteStore::new(backend));

    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Plain
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&mut service, cli.command, mode, &mut out)
}

fn resolve_config(cli: &Cli) -> Result<StoreConfig> {
    let mut config = StoreConfig::from_env().context("invalid MONONOTE_* environment")?;
    if let Some(backend) = &cli.backend {
        config.backend = backend.parse()?;
    }
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    Ok(config)
}
