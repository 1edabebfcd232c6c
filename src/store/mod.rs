//! Note persistence: slot backends and the note repository

mod backend;
mod file;
mod repository;
mod sqlite;

pub use backend::{MemoryBackend, SlotBackend};
pub use file::FileBackend;
pub use repository::{NOTES_SLOT, NoteRepository, SlotStore, StoreError, StoreResult};
pub use sqlite::SqliteBackend;
