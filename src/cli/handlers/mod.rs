//! Command handlers for the CLI.

mod calendar;
mod enhance;
mod export;
mod list;
mod new;
mod remove;
mod resolve;
mod show_edit;

#[cfg(test)]
pub(crate) mod tests;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::cli::Backend;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::domain::Note;
use crate::store::{FileBackend, SlotBackend, SlotStore, SqliteBackend};

// Re-export public items
pub use calendar::handle_calendar;
pub use enhance::handle_enhance;
pub use export::{handle_export, handle_print};
pub use list::handle_list;
pub use new::handle_new;
pub use remove::handle_remove;
pub use resolve::{ResolveResult, resolve_note};
pub use show_edit::{handle_edit, handle_show};

// Re-export for tests
#[cfg(test)]
pub(crate) use calendar::render_month;
#[cfg(test)]
pub(crate) use enhance::handle_enhance_impl;
#[cfg(test)]
pub(crate) use new::create_note;
#[cfg(test)]
pub(crate) use remove::handle_remove_impl;
#[cfg(test)]
pub(crate) use show_edit::{EditorLauncher, handle_edit_impl};

/// The note store the CLI works against.
pub type Store = SlotStore<Box<dyn SlotBackend>>;

// ===========================================
// Shared Utilities
// ===========================================

/// Returns the SQLite database path for a data directory.
pub(crate) fn sqlite_db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("daybook.db")
}

/// Opens the note store in `data_dir` using the chosen backend.
pub fn open_store(data_dir: &Path, backend: Backend) -> Result<Store> {
    let backend: Box<dyn SlotBackend> = match backend {
        Backend::File => Box::new(
            FileBackend::open(data_dir)
                .with_context(|| format!("failed to open data directory {}", data_dir.display()))?,
        ),
        Backend::Sqlite => {
            let db_path = sqlite_db_path(data_dir);
            Box::new(
                SqliteBackend::open(&db_path)
                    .with_context(|| format!("failed to open database at {}", db_path.display()))?,
            )
        }
    };
    Ok(SlotStore::new(backend))
}

/// Prints a set of notes in the requested format.
pub(crate) fn print_notes(notes: &[&Note], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("No notes found.");
                return Ok(());
            }

            println!("{:<10}  {:<50}  {:>10}", "ID", "Title", "Updated");
            println!(
                "{:<10}  {:<50}  {:>10}",
                "----------",
                "--------------------------------------------------",
                "----------"
            );

            for note in notes {
                let title = truncate_str(display_title(note), 50);
                let updated = note
                    .updated()
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d");
                println!("{:<10}  {:<50}  {:>10}", note.id().prefix(), title, updated);
            }

            println!();
            println!("{} note(s)", notes.len());
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(|n| NoteListing::from(*n)).collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
        OutputFormat::Ids => {
            for note in notes {
                println!("{}", note.id());
            }
        }
    }
    Ok(())
}

/// Title shown in listings; notes saved without a heading show a placeholder.
pub(crate) fn display_title(note: &Note) -> &str {
    if note.title().is_empty() {
        crate::domain::UNTITLED
    } else {
        note.title()
    }
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
