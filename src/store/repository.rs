//! NoteRepository trait and the slot-backed implementation.

use std::path::PathBuf;

use log::{debug, error, warn};
use thiserror::Error;

use crate::domain::{Note, NoteId};
use crate::store::SlotBackend;

/// Slot holding the serialized note collection.
pub const NOTES_SLOT: &str = "notes";

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Writing a slot failed; the persisted collection is unchanged.
    #[error("failed to write slot '{slot}': {reason}")]
    Write { slot: String, reason: String },

    /// The slot holds text that is not a valid note collection.
    #[error("notes in slot '{slot}' are unreadable: {reason}")]
    Corrupt { slot: String, reason: String },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The collection could not be serialized.
    #[error("failed to serialize notes: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence boundary for the note collection.
///
/// Each write operation loads the full collection, applies one change and
/// writes the full collection back in a single call. A write never runs
/// over a slot that failed to load.
pub trait NoteRepository {
    /// Loads the whole collection in stored order.
    ///
    /// An absent slot is an empty collection. An unreadable or corrupt slot
    /// is an error.
    fn load(&self) -> StoreResult<Vec<Note>>;

    /// Returns the whole collection in stored order.
    ///
    /// Never fails: an unreadable or corrupt slot yields an empty
    /// collection.
    fn list_all(&self) -> Vec<Note> {
        self.load().unwrap_or_else(|e| {
            warn!("{}", e);
            Vec::new()
        })
    }

    /// Replaces the note with the same id in place, or prepends it.
    ///
    /// Returns the resulting collection.
    fn upsert(&mut self, note: Note) -> StoreResult<Vec<Note>>;

    /// Removes the note with `id`. Removing an absent id is not an error.
    ///
    /// Returns the resulting collection.
    fn remove(&mut self, id: &NoteId) -> StoreResult<Vec<Note>>;

    /// Finds a note by exact id.
    fn find(&self, id: &NoteId) -> Option<Note> {
        self.list_all().into_iter().find(|n| n.id() == id)
    }
}

/// Note store over a single named slot of a [`SlotBackend`].
pub struct SlotStore<B> {
    backend: B,
    slot: String,
}

impl<B: SlotBackend> SlotStore<B> {
    /// Creates a store over the default `notes` slot.
    pub fn new(backend: B) -> Self {
        Self::with_slot(backend, NOTES_SLOT)
    }

    /// Creates a store over a custom slot name.
    pub fn with_slot(backend: B, slot: impl Into<String>) -> Self {
        Self {
            backend,
            slot: slot.into(),
        }
    }

    /// Returns the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn persist(&mut self, notes: &[Note]) -> StoreResult<()> {
        let json = serde_json::to_string(notes).inspect_err(|e| {
            error!("failed to serialize {} notes: {}", notes.len(), e);
        })?;

        self.backend.write(&self.slot, &json).inspect_err(|e| {
            error!("failed to save notes: {}", e);
        })
    }
}

impl<B: SlotBackend> NoteRepository for SlotStore<B> {
    fn load(&self) -> StoreResult<Vec<Note>> {
        let Some(raw) = self.backend.read(&self.slot)? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            slot: self.slot.clone(),
            reason: e.to_string(),
        })
    }

    fn upsert(&mut self, note: Note) -> StoreResult<Vec<Note>> {
        let mut notes = self.load().inspect_err(|e| {
            error!("refusing to save note {}: {}", note.id(), e);
        })?;
        match notes.iter().position(|n| n.id() == note.id()) {
            Some(idx) => {
                debug!("replacing note {} at position {}", note.id(), idx);
                notes[idx] = note;
            }
            None => {
                debug!("prepending note {}", note.id());
                notes.insert(0, note);
            }
        }

        self.persist(&notes)?;
        Ok(notes)
    }

    fn remove(&mut self, id: &NoteId) -> StoreResult<Vec<Note>> {
        let mut notes = self.load().inspect_err(|e| {
            error!("refusing to remove note {}: {}", id, e);
        })?;
        notes.retain(|n| n.id() != id);

        self.persist(&notes)?;
        Ok(notes)
    }
}
