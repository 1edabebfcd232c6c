//! View layer: routing, list and calendar projections, and the editor.

pub mod calendar;
pub mod editor;
mod route;
pub mod search;

pub use calendar::{CalendarMonth, CalendarState, DayCell, created_on, notes_on};
pub use editor::{
    AI_FAILURE_NOTICE, Confirm, DeleteOutcome, DisplayMode, EditState, EditorError,
    EditorSession, EnhanceOutcome, EnhanceRequest, Opened,
};
pub use route::{EditorTarget, NEW_NOTE_SENTINEL, ParseRouteError, Route};
pub use search::{SortOrder, search, sort_notes};
