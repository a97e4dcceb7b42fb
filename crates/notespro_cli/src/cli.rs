//! Command definitions and handlers for the `notespro` binary.

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use notespro_core::storage::encode_state;
use notespro_core::{
    difficulty_stats, query_notes, Difficulty, EntityId, NewNote, Note, NoteFilter, NotePatch,
    NoteSort, NotebookService, NotesStore, PersistentNotesStore, SqliteStateStorage,
    FALLBACK_CATEGORY_NAME,
};

pub type Service = NotebookService<PersistentNotesStore<SqliteStateStorage>>;

#[derive(Parser)]
#[command(name = "notespro")]
#[command(about = "Study notes with tags, categories and difficulty levels")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the core library is linked
    Ping,
    /// Show note counts per difficulty
    Stats,
    /// List notes, newest first unless --sort says otherwise
    List {
        /// Case-insensitive text matched against title or content
        #[arg(long, default_value = "")]
        search: String,
        /// Exact category name
        #[arg(long)]
        category: Option<String>,
        /// easy|medium|difficult
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Tag name; repeat to match any of several
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// newest|oldest|title|difficulty
        #[arg(long, default_value = "newest")]
        sort: NoteSort,
    },
    /// Add a new note
    AddNote {
        /// Note title
        title: String,
        /// Note content
        #[arg(long)]
        content: String,
        /// Category name
        #[arg(long, default_value = FALLBACK_CATEGORY_NAME)]
        category: String,
        /// easy|medium|difficult
        #[arg(long, default_value = "easy")]
        difficulty: Difficulty,
        /// Tag name; repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Edit a note; only the given fields change
    EditNote {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Replace the note's tags; repeatable
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
    },
    /// Set a note's difficulty
    SetDifficulty {
        id: String,
        /// easy|medium|difficult
        difficulty: Difficulty,
    },
    /// Toggle whether a note's content is shown
    Reveal { id: String },
    /// Delete a note
    DeleteNote { id: String },
    /// List tags
    Tags,
    /// Add a tag
    AddTag { name: String },
    /// Rename a tag; notes keep the old name
    RenameTag { id: String, name: String },
    /// Make a tag the default, or clear it if it already is
    ToggleDefaultTag { id: String },
    /// Delete a tag and strip it from notes
    DeleteTag { id: String },
    /// List categories
    Categories,
    /// Add a category
    AddCategory {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Rename and re-describe a category; notes keep the old name
    EditCategory {
        id: String,
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a category and move its notes to the fallback category
    DeleteCategory { id: String },
    /// Print the stored snapshot as JSON
    Export,
}

/// Runs one command against the service.
pub fn dispatch(command: Commands, service: &mut Service) -> Result<()> {
    match command {
        Commands::Ping => println!("pong version={}", notespro_core::core_version()),
        Commands::Stats => handle_stats(service),
        Commands::List {
            search,
            category,
            difficulty,
            tags,
            sort,
        } => {
            let filter = NoteFilter {
                search,
                category,
                difficulty,
                tags,
            };
            handle_list(service, &filter, sort);
        }
        Commands::AddNote {
            title,
            content,
            category,
            difficulty,
            tags,
        } => {
            let id = service.create_note(NewNote {
                title,
                content,
                category,
                difficulty,
                tags,
                is_revealed: None,
            })?;
            println!("Note created successfully (ID: {id})");
        }
        Commands::EditNote {
            id,
            title,
            content,
            category,
            tags,
        } => {
            let patch = NotePatch {
                title,
                content,
                category,
                tags,
                ..NotePatch::default()
            };
            service.edit_note(&EntityId::from(id), patch)?;
            println!("Note updated");
        }
        Commands::SetDifficulty { id, difficulty } => {
            service.set_difficulty(&EntityId::from(id), difficulty)?;
            println!("Difficulty set to {difficulty}");
        }
        Commands::Reveal { id } => {
            let revealed = service.toggle_reveal(&EntityId::from(id))?;
            println!("Note {}", if revealed { "revealed" } else { "hidden" });
        }
        Commands::DeleteNote { id } => {
            service.delete_note(&EntityId::from(id))?;
            println!("Note deleted");
        }
        Commands::Tags => {
            for tag in service.store().tags() {
                let marker = if tag.is_default { " (default)" } else { "" };
                println!("{}\t{}\t{}{}", tag.id, tag.color, tag.name, marker);
            }
        }
        Commands::AddTag { name } => {
            let id = service.create_tag(&name)?;
            println!("Tag created successfully (ID: {id})");
        }
        Commands::RenameTag { id, name } => {
            service.rename_tag(&EntityId::from(id), &name)?;
            println!("Tag renamed");
        }
        Commands::ToggleDefaultTag { id } => {
            let is_default = service.toggle_default_tag(&EntityId::from(id))?;
            println!(
                "Tag {}",
                if is_default {
                    "is now the default"
                } else {
                    "is no longer the default"
                }
            );
        }
        Commands::DeleteTag { id } => {
            service.delete_tag(&EntityId::from(id))?;
            println!("Tag deleted");
        }
        Commands::Categories => {
            for category in service.store().categories() {
                let count = service
                    .store()
                    .notes()
                    .iter()
                    .filter(|note| note.category == category.name)
                    .count();
                println!(
                    "{}\t{}\t{} ({} notes)\t{}",
                    category.id, category.color, category.name, count, category.description
                );
            }
        }
        Commands::AddCategory { name, description } => {
            let id = service.create_category(&name, &description)?;
            println!("Category created successfully (ID: {id})");
        }
        Commands::EditCategory {
            id,
            name,
            description,
        } => {
            service.edit_category(&EntityId::from(id), &name, &description)?;
            println!("Category updated");
        }
        Commands::DeleteCategory { id } => {
            service.delete_category(&EntityId::from(id))?;
            println!("Category deleted");
        }
        Commands::Export => {
            let encoded = encode_state(service.store().snapshot())
                .map_err(|err| eyre!("failed to export notes: {err}"))?;
            println!("{encoded}");
        }
    }

    if let Some(err) = service.store().last_persist_error() {
        eprintln!("warning: changes were not saved: {err}");
    }
    Ok(())
}

fn handle_stats(service: &Service) {
    let stats = difficulty_stats(service.store().notes());
    println!("total\t{}", stats.total);
    for difficulty in Difficulty::ALL {
        println!("{}\t{}", difficulty, stats.count(difficulty));
    }
}

fn handle_list(service: &Service, filter: &NoteFilter, sort: NoteSort) {
    let all = service.store().notes();
    let notes = query_notes(all, filter, sort);
    if filter.is_active() {
        println!("Filters active - Showing {} of {} notes", notes.len(), all.len());
    }
    if notes.is_empty() {
        println!("No notes found");
        return;
    }
    for note in notes {
        print_note(note);
    }
}

fn print_note(note: &Note) {
    println!(
        "{}\t[{}]\t{}\t{}",
        note.id, note.difficulty, note.category, note.title
    );
    if !note.tags.is_empty() {
        println!("\ttags: {}", note.tags.join(", "));
    }
    if note.revealed() {
        println!("\t{}", note.content);
    }
    println!("\tcreated {}", note.created_at.format("%Y-%m-%d %H:%M"));
}
