//! `notespro` command-line front end.
//!
//! # Responsibility
//! - Compose config, logging, storage and the notebook service.
//! - Dispatch one subcommand per invocation.

mod cli;

use clap::Parser;
use cli::Cli;
use color_eyre::Result;
use notespro_core::{
    init_logging, NotebookService, NotesConfig, PersistentNotesStore, SqliteStateStorage,
    SystemClock,
};
use std::path::Path;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => NotesConfig::load_from(Path::new(path))?,
        None => NotesConfig::load()?,
    };

    // Logging is best effort; the command still runs without it.
    match config.log_dir() {
        Some(log_dir) => {
            if let Err(err) = init_logging(&config.log_level, &log_dir) {
                eprintln!("warning: logging disabled: {err}");
            }
        }
        None => eprintln!("warning: logging disabled: no log directory"),
    }

    let database_path = config.database_path();
    if let Some(parent) = database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let storage = SqliteStateStorage::open(&database_path)?;
    let store = PersistentNotesStore::open_with(storage, SystemClock, config.storage_key.clone());
    log::info!(
        "event=cli_start module=cli status=ok load_outcome={:?}",
        store.load_outcome()
    );

    let mut service = NotebookService::new(store);
    cli::dispatch(cli.command, &mut service)
}
