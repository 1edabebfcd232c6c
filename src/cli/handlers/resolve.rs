//! Note resolution utilities.

use anyhow::{Result, bail};

use crate::domain::Note;
use crate::store::NoteRepository;

/// Result of resolving a note identifier.
#[derive(Debug)]
pub enum ResolveResult {
    /// Exactly one note matched.
    Unique(Note),
    /// Multiple notes matched (ambiguous).
    Ambiguous(Vec<Note>),
    /// No notes matched.
    NotFound,
}

/// Prints the candidates of an ambiguous identifier to help distinguish them.
pub(crate) fn print_ambiguous_notes(identifier: &str, notes: &[Note]) {
    eprintln!("Ambiguous: '{}' matches {} notes:", identifier, notes.len());
    for note in notes {
        eprintln!("  {} - {}", note.id(), super::display_title(note));
    }
    eprintln!();
    eprintln!("Use a longer ID prefix to specify which note you mean.");
}

/// Resolves a note identifier to a unique note.
///
/// Resolution order:
/// 1. Exact ID match
/// 2. ID prefix match, ignoring case
pub fn resolve_note<R: NoteRepository + ?Sized>(repo: &R, identifier: &str) -> ResolveResult {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return ResolveResult::NotFound;
    }

    let notes = repo.list_all();

    if let Some(note) = notes.iter().find(|n| n.id().as_str() == identifier) {
        return ResolveResult::Unique(note.clone());
    }

    let mut candidates: Vec<Note> = notes
        .into_iter()
        .filter(|n| n.id().starts_with_ignore_case(identifier))
        .collect();

    match candidates.len() {
        0 => ResolveResult::NotFound,
        1 => ResolveResult::Unique(candidates.remove(0)),
        _ => ResolveResult::Ambiguous(candidates),
    }
}

/// Resolves `identifier` or fails with a user-facing error.
pub(crate) fn require_note<R: NoteRepository + ?Sized>(repo: &R, identifier: &str) -> Result<Note> {
    match resolve_note(repo, identifier) {
        ResolveResult::Unique(note) => Ok(note),
        ResolveResult::Ambiguous(notes) => {
            print_ambiguous_notes(identifier, &notes);
            bail!("ambiguous note identifier");
        }
        ResolveResult::NotFound => {
            bail!("note not found: '{}'", identifier);
        }
    }
}
