//! Core types: Note, NoteId

mod note;
mod note_id;

pub use note::{DEFAULT_NOTE_CONTENT, Note, ParseNoteError, UNTITLED, derive_title};
pub use note_id::{NoteId, ParseNoteIdError};
