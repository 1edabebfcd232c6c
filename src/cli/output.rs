//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::Note;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Plain note IDs, one per line
    Ids,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub id: String,
    pub title: String,
    pub created: String,
    pub updated: String,
}

impl From<&Note> for NoteListing {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().to_string(),
            title: note.title().to_string(),
            created: note.created().to_rfc3339(),
            updated: note.updated().to_rfc3339(),
        }
    }
}

/// A calendar month with the selected day's notes.
#[derive(Debug, Serialize)]
pub struct CalendarListing {
    pub month: String,
    pub selected: String,
    /// Days of the month with at least one note.
    pub days_with_notes: Vec<u32>,
    pub notes: Vec<NoteListing>,
}
