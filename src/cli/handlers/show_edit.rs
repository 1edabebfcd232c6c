//! Show and Edit command handlers.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local, Utc};
use std::path::Path;

use super::new::open_in_editor;
use super::resolve::require_note;
use crate::cli::config::Config;
use crate::cli::{EditArgs, ShowArgs};
use crate::domain::Note;
use crate::export::markdown_to_html;
use crate::store::NoteRepository;
use crate::view::{EditorSession, EditorTarget, NEW_NOTE_SENTINEL, Opened};

pub fn handle_show<R: NoteRepository + ?Sized>(args: &ShowArgs, repo: &R) -> Result<()> {
    let note = require_note(repo, &args.note)?;

    if args.html {
        print!("{}", markdown_to_html(note.content()));
        return Ok(());
    }

    println!(
        "ID: {}  Created: {}  Updated: {}",
        note.id().prefix(),
        note.created().with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        note.updated().with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    println!();
    println!("{}", note.content());

    Ok(())
}

/// Trait for launching an editor (allows mocking in tests).
pub(crate) trait EditorLauncher {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Launches the configured editor command.
pub(crate) struct CommandEditor<'a>(pub(crate) &'a Config);

impl EditorLauncher for CommandEditor<'_> {
    fn open(&self, path: &Path) -> Result<()> {
        open_in_editor(path, self.0)
    }
}

/// Round-trips the session's content through a temporary markdown file.
pub(crate) fn edit_content<E: EditorLauncher + ?Sized>(
    session: &mut EditorSession,
    editor: &E,
) -> Result<()> {
    let file = tempfile::Builder::new()
        .prefix("daybook-")
        .suffix(".md")
        .tempfile()
        .with_context(|| "failed to create temporary file")?;

    std::fs::write(file.path(), session.note().content())
        .with_context(|| format!("failed to write {}", file.path().display()))?;

    editor.open(file.path())?;

    let content = std::fs::read_to_string(file.path())
        .with_context(|| format!("failed to read {}", file.path().display()))?;
    session.set_content(content);
    Ok(())
}

/// Internal implementation that accepts a generic editor launcher.
pub(crate) fn handle_edit_impl<R, E>(
    args: &EditArgs,
    repo: &mut R,
    editor: &E,
    now: DateTime<Utc>,
) -> Result<Note>
where
    R: NoteRepository + ?Sized,
    E: EditorLauncher + ?Sized,
{
    let target = if args.note.trim().eq_ignore_ascii_case(NEW_NOTE_SENTINEL) {
        EditorTarget::New
    } else {
        EditorTarget::Existing(require_note(repo, &args.note)?.id().clone())
    };

    let mut session = match EditorSession::open(&target, repo, now) {
        Opened::Session(session) => session,
        Opened::Redirect(_) => bail!("note not found: '{}'", args.note),
    };

    edit_content(&mut session, editor)?;
    session
        .leave(repo, now)
        .with_context(|| "failed to save note")?;

    Ok(session.note().clone())
}

pub fn handle_edit<R: NoteRepository + ?Sized>(
    args: &EditArgs,
    repo: &mut R,
    config: &Config,
) -> Result<()> {
    let note = handle_edit_impl(args, repo, &CommandEditor(config), Utc::now())?;
    println!("Saved: {} [{}]", note.title(), note.id().prefix());
    Ok(())
}
