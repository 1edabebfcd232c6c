//! Builder for test notes with sensible defaults.

use chrono::{DateTime, Utc};
use daybook::domain::{Note, NoteId};

/// Builder for creating test notes with sensible defaults.
///
/// Automatically generates an ID and timestamps; the title is derived from
/// the content the same way a save derives it.
#[derive(Debug)]
pub struct TestNote {
    id: NoteId,
    content: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl TestNote {
    /// Creates a new test note with the given markdown content.
    pub fn new(content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::new(),
            content: content.into(),
            created: now,
            updated: now,
        }
    }

    /// Sets an explicit ID for the note.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into().parse().expect("Invalid NoteId");
        self
    }

    /// Sets the creation time (RFC 3339); the update time follows unless later.
    pub fn created(mut self, rfc3339: &str) -> Self {
        self.created = DateTime::parse_from_rfc3339(rfc3339)
            .expect("Invalid timestamp")
            .with_timezone(&Utc);
        self.updated = self.updated.max(self.created);
        self
    }

    /// Returns the 10-character ID prefix.
    pub fn id_prefix(&self) -> String {
        self.id.prefix().to_string()
    }

    /// Returns the ID.
    pub fn note_id(&self) -> &NoteId {
        &self.id
    }

    /// Converts this TestNote to a saved domain Note.
    pub fn to_note(&self) -> Note {
        Note::new(self.id.clone(), "", &self.content, self.created, self.created)
            .expect("TestNote should always produce valid Note")
            .saved(self.updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_derives_title() {
        let note = TestNote::new("# My Test Note\nbody").to_note();
        assert_eq!(note.title(), "My Test Note");
    }

    #[test]
    fn test_note_generates_id() {
        let note = TestNote::new("x");
        assert_eq!(note.note_id().to_string().len(), 26, "Should generate a valid ULID");
    }

    #[test]
    fn test_note_custom_id_and_created() {
        let note = TestNote::new("x")
            .id("abc")
            .created("2024-02-29T23:30:00Z")
            .to_note();
        assert_eq!(note.id().as_str(), "abc");
        assert_eq!(note.created().to_rfc3339(), "2024-02-29T23:30:00+00:00");
        assert!(note.updated() >= note.created());
    }
}
