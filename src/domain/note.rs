//! Note record: identity, markdown content and timestamps.

use crate::domain::NoteId;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Content given to a note when the user starts a new entry.
pub const DEFAULT_NOTE_CONTENT: &str = "# New Note\n\nStart writing...";

/// Title used when the first line of a note is blank.
pub const UNTITLED: &str = "Untitled Note";

static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#+\s*").expect("heading pattern is valid"));

/// The kind of error that occurred when constructing a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseNoteErrorKind {
    UpdatedBeforeCreated,
    TimestampOutOfRange(i64),
}

/// Error returned when constructing or decoding an invalid note.
#[derive(Debug, Clone)]
pub struct ParseNoteError {
    kind: ParseNoteErrorKind,
}

impl fmt::Display for ParseNoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseNoteErrorKind::UpdatedBeforeCreated => {
                write!(f, "invalid note: updatedAt is earlier than createdAt")
            }
            ParseNoteErrorKind::TimestampOutOfRange(ms) => {
                write!(f, "invalid note: timestamp {ms} is out of range")
            }
        }
    }
}

impl std::error::Error for ParseNoteError {}

/// A markdown note.
///
/// Notes are replaced as whole records: the mutators below consume the
/// note and return the new version rather than editing fields in place.
/// Timestamps are kept at millisecond precision, the resolution of the
/// persisted form.
///
/// # Invariants
/// - `created <= updated`
/// - `id` never changes after creation
///
/// # Examples
///
/// ```
/// use daybook::domain::Note;
/// use chrono::Utc;
///
/// let draft = Note::draft(Utc::now());
/// let saved = draft.with_content("# Groceries\n- milk").saved(Utc::now());
/// assert_eq!(saved.title(), "Groceries");
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NoteRecord", into = "NoteRecord")]
pub struct Note {
    id: NoteId,
    title: String,
    content: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl Note {
    /// Creates a note from all of its fields.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if `updated` is earlier than `created`.
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        created: DateTime<Utc>,
        updated: DateTime<Utc>,
    ) -> Result<Self, ParseNoteError> {
        let created = truncate_to_millis(created);
        let updated = truncate_to_millis(updated);
        if updated < created {
            return Err(ParseNoteError {
                kind: ParseNoteErrorKind::UpdatedBeforeCreated,
            });
        }

        Ok(Self {
            id,
            title: title.into(),
            content: content.into(),
            created,
            updated,
        })
    }

    /// Creates an unsaved note with a fresh id and the default content.
    ///
    /// The title stays empty until the first save.
    pub fn draft(now: DateTime<Utc>) -> Self {
        let now = truncate_to_millis(now);
        Self {
            id: NoteId::new(),
            title: String::new(),
            content: DEFAULT_NOTE_CONTENT.to_string(),
            created: now,
            updated: now,
        }
    }

    /// Returns this note with its content replaced.
    pub fn with_content(self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self
        }
    }

    /// Returns this note as it looks after a save at `now`.
    ///
    /// The title is re-derived from the first line of content and the
    /// update time is stamped. A clock that reads earlier than the
    /// creation time is clamped so the ordering invariant holds.
    pub fn saved(self, now: DateTime<Utc>) -> Self {
        let updated = truncate_to_millis(now).max(self.created);
        Self {
            title: derive_title(&self.content),
            updated,
            ..self
        }
    }

    /// Returns the note's unique identifier.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the note's title (empty before the first save).
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the markdown content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the note was created.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Returns when the note was last saved.
    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.id.prefix())
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("content", &self.content)
            .field("created", &self.created)
            .field("updated", &self.updated)
            .finish()
    }
}

/// Derives a title from the first line of markdown content.
///
/// Leading `#` heading markers and the whitespace after them are removed,
/// then the line is trimmed. Blank results fall back to [`UNTITLED`].
pub fn derive_title(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or("");
    let title = HEADING_MARKER.replace(first_line, "");
    let title = title.trim();
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title.to_string()
    }
}

fn truncate_to_millis(dt: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or(dt)
}

// ===========================================
// Persisted form
// ===========================================

/// On-disk shape of a note: camelCase keys, integer millisecond timestamps.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteRecord {
    id: NoteId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<NoteRecord> for Note {
    type Error = ParseNoteError;

    fn try_from(record: NoteRecord) -> Result<Self, Self::Error> {
        let created = from_millis(record.created_at)?;
        let updated = from_millis(record.updated_at)?;
        Note::new(record.id, record.title, record.content, created, updated)
    }
}

impl From<Note> for NoteRecord {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            created_at: note.created.timestamp_millis(),
            updated_at: note.updated.timestamp_millis(),
        }
    }
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>, ParseNoteError> {
    DateTime::from_timestamp_millis(ms).ok_or(ParseNoteError {
        kind: ParseNoteErrorKind::TimestampOutOfRange(ms),
    })
}
