//! List view projection: substring search and ordering.

use std::cmp::Reverse;

use clap::ValueEnum;

use crate::domain::Note;

/// Ordering applied by the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Order kept by the store (newest-created first).
    #[default]
    Stored,
    /// Most recently saved first.
    Updated,
    /// Most recently created first.
    Created,
}

/// Returns the notes whose title or content contains `query`, ignoring case.
///
/// No tokenization or ranking: plain substring containment. An empty query
/// matches every note. Input order is preserved.
pub fn search<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let needle = query.to_lowercase();
    notes
        .iter()
        .filter(|note| {
            note.title().to_lowercase().contains(&needle)
                || note.content().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Sorts a projection in place.
///
/// The sort is stable, so ties keep their stored order.
pub fn sort_notes(notes: &mut [&Note], order: SortOrder) {
    match order {
        SortOrder::Stored => {}
        SortOrder::Updated => notes.sort_by_key(|n| Reverse(n.updated())),
        SortOrder::Created => notes.sort_by_key(|n| Reverse(n.created())),
    }
}
