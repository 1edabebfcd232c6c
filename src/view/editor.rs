//! Editor view state: save-state machine, display mode and AI enhancement.
//!
//! # Responsibility
//! - Hold a transient copy of one note while it is being edited.
//! - Write it back through the [`NoteRepository`] on explicit save, on
//!   leaving the editor, and remove it on confirmed delete.
//!
//! # Invariants
//! - A `New` note is not in the store until the first save.
//! - Switching between edit and preview never touches the store.
//! - At most one enhancement request is in flight, guarded by `busy`.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use thiserror::Error;

use crate::ai::{AiError, EnhanceMode, TextEnhancer};
use crate::domain::Note;
use crate::export::{ExportedDocument, PrintOptions, markdown_to_html, render_print_html};
use crate::store::{NoteRepository, StoreError, StoreResult};
use crate::view::{EditorTarget, Route};

/// Notice shown when an enhancement request fails.
pub const AI_FAILURE_NOTICE: &str = "AI Service unavailable. Check API Key.";

/// Question asked before a note is deleted.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this note?";

/// Inserted between existing content and continued text.
pub const CONTINUE_SEPARATOR: &str = "\n\n";

/// Persistence state of the edited note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// Not yet written to the store.
    New,
    /// Changed in memory since the last save.
    Editing,
    /// Matches what was last written to the store.
    Saved,
}

/// How the note is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Edit,
    Preview,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Edit => Self::Preview,
            Self::Preview => Self::Edit,
        }
    }
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("an AI request is already in progress")]
    Busy,
}

/// Result of opening the editor.
#[derive(Debug)]
pub enum Opened {
    Session(EditorSession),
    /// The requested note does not exist; go here instead.
    Redirect(Route),
}

/// Result of a delete request.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The user declined; nothing changed.
    Cancelled,
    /// The note is gone from the store (or was never there).
    ///
    /// Navigation proceeds even if the write failed; the failure is kept
    /// here for the caller to report.
    Removed {
        route: Route,
        write_error: Option<StoreError>,
    },
}

/// Result of an enhancement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnhanceOutcome {
    /// A summary to present; the content is unchanged.
    Summary(String),
    /// The content was replaced with corrected text.
    Replaced,
    /// Generated text was appended to the content.
    Appended,
    /// The request failed; the content is unchanged.
    Failed(String),
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A pending enhancement: what to send and which mode to apply on return.
#[derive(Debug, Clone)]
pub struct EnhanceRequest {
    pub mode: EnhanceMode,
    pub text: String,
}

/// One open editor.
#[derive(Debug)]
pub struct EditorSession {
    note: Note,
    state: EditState,
    mode: DisplayMode,
    busy: bool,
}

impl EditorSession {
    /// Opens the editor on `target`.
    ///
    /// `New` starts an unsaved draft created at `now`. An existing id is
    /// loaded from the store; a stale or unknown id redirects to the list.
    pub fn open<R: NoteRepository + ?Sized>(
        target: &EditorTarget,
        repo: &R,
        now: DateTime<Utc>,
    ) -> Opened {
        match target {
            EditorTarget::New => Opened::Session(Self::with_note(Note::draft(now), EditState::New)),
            EditorTarget::Existing(id) => match repo.find(id) {
                Some(note) => Opened::Session(Self::with_note(note, EditState::Saved)),
                None => {
                    info!("note {} not found, returning to list", id);
                    Opened::Redirect(Route::List)
                }
            },
        }
    }

    fn with_note(note: Note, state: EditState) -> Self {
        Self {
            note,
            state,
            mode: DisplayMode::Edit,
            busy: false,
        }
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    /// Returns true while an enhancement request is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Returns the route this session lives at.
    pub fn route(&self) -> Route {
        match self.state {
            EditState::New => Route::Editor(EditorTarget::New),
            _ => Route::Editor(EditorTarget::Existing(self.note.id().clone())),
        }
    }

    // ===========================================
    // Editing
    // ===========================================

    /// Replaces the content in memory.
    pub fn set_content(&mut self, content: impl Into<String>) {
        let note = self.note.clone().with_content(content);
        self.replace_note(note);
    }

    fn replace_note(&mut self, note: Note) {
        self.note = note;
        if self.state == EditState::Saved {
            self.state = EditState::Editing;
        }
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    pub fn toggle_display_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Rendered markdown shown in preview mode.
    pub fn preview_html(&self) -> String {
        markdown_to_html(self.note.content())
    }

    // ===========================================
    // Persistence
    // ===========================================

    /// Derives the title, stamps the update time and upserts the note.
    ///
    /// On failure the session keeps its previous state so the caller can
    /// retry or warn.
    pub fn save<R: NoteRepository + ?Sized>(
        &mut self,
        repo: &mut R,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<Note>> {
        let saved = self.note.clone().saved(now);
        let notes = repo.upsert(saved.clone())?;

        info!("saved note {} ({})", saved.id(), saved.title());
        self.note = saved;
        self.state = EditState::Saved;
        Ok(notes)
    }

    /// Leaves the editor; leaving always saves first.
    pub fn leave<R: NoteRepository + ?Sized>(
        &mut self,
        repo: &mut R,
        now: DateTime<Utc>,
    ) -> StoreResult<Route> {
        self.save(repo, now)?;
        Ok(Route::List)
    }

    /// Deletes the note after confirmation.
    ///
    /// Removing a note that was never saved is a no-op on the store; the
    /// editor still navigates to the list.
    pub fn delete<R, C>(&self, repo: &mut R, confirm: &mut C) -> DeleteOutcome
    where
        R: NoteRepository + ?Sized,
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Cancelled;
        }

        let write_error = match repo.remove(self.note.id()) {
            Ok(_) => {
                info!("deleted note {}", self.note.id());
                None
            }
            Err(e) => {
                warn!("delete of note {} was not persisted: {}", self.note.id(), e);
                Some(e)
            }
        };

        DeleteOutcome::Removed {
            route: Route::List,
            write_error,
        }
    }

    // ===========================================
    // Export
    // ===========================================

    /// Packages the current content as a downloadable document.
    pub fn export_document(&self) -> ExportedDocument {
        ExportedDocument::from_note(&self.note)
    }

    /// Switches to preview and renders the print-formatted page.
    pub fn print_document(&mut self, options: &PrintOptions) -> Result<String> {
        self.mode = DisplayMode::Preview;
        render_print_html(&self.note, options)
    }

    // ===========================================
    // AI enhancement
    // ===========================================

    /// Marks the session busy and returns what to send.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::Busy` if a request is already in flight.
    pub fn begin_enhance(&mut self, mode: EnhanceMode) -> Result<EnhanceRequest, EditorError> {
        if self.busy {
            return Err(EditorError::Busy);
        }
        self.busy = true;
        Ok(EnhanceRequest {
            mode,
            text: self.note.content().to_string(),
        })
    }

    /// Applies the service's answer and clears the busy flag.
    pub fn finish_enhance(
        &mut self,
        mode: EnhanceMode,
        result: Result<String, AiError>,
    ) -> EnhanceOutcome {
        self.busy = false;

        let text = match result {
            Ok(text) => text,
            Err(e) => {
                error!("{} failed for note {}: {}", mode, self.note.id(), e);
                return EnhanceOutcome::Failed(AI_FAILURE_NOTICE.to_string());
            }
        };

        match mode {
            EnhanceMode::Summarize => EnhanceOutcome::Summary(text),
            EnhanceMode::FixGrammar => {
                self.set_content(text);
                EnhanceOutcome::Replaced
            }
            EnhanceMode::ContinueWriting => {
                let content = format!("{}{}{}", self.note.content(), CONTINUE_SEPARATOR, text);
                self.set_content(content);
                EnhanceOutcome::Appended
            }
        }
    }

    /// Sends the content to `enhancer` and applies the result.
    pub async fn enhance<E: TextEnhancer + ?Sized>(
        &mut self,
        enhancer: &E,
        mode: EnhanceMode,
    ) -> Result<EnhanceOutcome, EditorError> {
        let request = self.begin_enhance(mode)?;
        let result = enhancer.enhance(&request.text, request.mode).await;
        Ok(self.finish_enhance(request.mode, result))
    }
}
