//! Navigable destinations: list, calendar and the note editor.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::{NoteId, ParseNoteIdError};

/// Identifier that asks the editor for a brand-new note.
pub const NEW_NOTE_SENTINEL: &str = "new";

/// What the editor was opened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorTarget {
    /// A fresh note that has not been saved yet.
    New,
    /// A note that should already exist in the store.
    Existing(NoteId),
}

impl FromStr for EditorTarget {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == NEW_NOTE_SENTINEL {
            return Ok(Self::New);
        }
        s.parse().map(Self::Existing)
    }
}

impl fmt::Display for EditorTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => f.write_str(NEW_NOTE_SENTINEL),
            Self::Existing(id) => write!(f, "{id}"),
        }
    }
}

/// A logical destination.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// Note list with search (the default destination).
    #[default]
    List,
    /// Month calendar with notes of the selected day.
    Calendar,
    /// Editor for one note.
    Editor(EditorTarget),
}

impl Route {
    /// Returns the path form of this route (`/`, `/calendar`, `/note/<id>`).
    pub fn path(&self) -> String {
        match self {
            Self::List => "/".to_string(),
            Self::Calendar => "/calendar".to_string(),
            Self::Editor(target) => format!("/note/{target}"),
        }
    }

    /// The global navigation bar is hidden while editing.
    pub fn shows_nav_bar(&self) -> bool {
        !matches!(self, Self::Editor(_))
    }
}

/// Error returned when a path names no known route.
#[derive(Debug, Error)]
pub enum ParseRouteError {
    #[error("unknown route: {0}")]
    Unknown(String),

    #[error("invalid note in route: {0}")]
    InvalidNote(#[from] ParseNoteIdError),
}

impl FromStr for Route {
    type Err = ParseRouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "/" => Ok(Self::List),
            "/calendar" => Ok(Self::Calendar),
            _ => match s.strip_prefix("/note/") {
                Some(rest) => Ok(Self::Editor(rest.parse()?)),
                None => Err(ParseRouteError::Unknown(s.to_string())),
            },
        }
    }
}
