//! List command handler.

use anyhow::Result;

use super::print_notes;
use crate::cli::ListArgs;
use crate::domain::Note;
use crate::store::NoteRepository;
use crate::view::{search, sort_notes};

/// Returns the notes the list view shows for `args`.
pub(crate) fn list_view<'a>(notes: &'a [Note], args: &ListArgs) -> Vec<&'a Note> {
    let mut shown = search(notes, args.search.as_deref().unwrap_or(""));
    sort_notes(&mut shown, args.sort);
    shown
}

pub fn handle_list<R: NoteRepository + ?Sized>(args: &ListArgs, repo: &R) -> Result<()> {
    let notes = repo.list_all();
    let shown = list_view(&notes, args);
    print_notes(&shown, args.format)
}
