//! Remove command handler.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use std::io::{BufRead, Write};

use super::resolve::require_note;
use crate::cli::RemoveArgs;
use crate::store::NoteRepository;
use crate::view::{Confirm, DeleteOutcome, EditorSession, EditorTarget, Opened};

/// Asks on stderr and reads the answer from stdin; only `y`/`yes` confirm.
pub(crate) fn prompt_stdin(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    let _ = std::io::stderr().flush();

    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Deletes the resolved note after `confirm` agrees.
///
/// Returns false if the user declined.
pub(crate) fn handle_remove_impl<R, C>(args: &RemoveArgs, repo: &mut R, confirm: &mut C) -> Result<bool>
where
    R: NoteRepository + ?Sized,
    C: Confirm + ?Sized,
{
    let note = require_note(repo, &args.note)?;
    let target = EditorTarget::Existing(note.id().clone());

    let Opened::Session(session) = EditorSession::open(&target, repo, Utc::now()) else {
        bail!("note not found: '{}'", args.note);
    };

    match session.delete(repo, confirm) {
        DeleteOutcome::Cancelled => Ok(false),
        DeleteOutcome::Removed {
            write_error: Some(err),
            ..
        } => Err(err).with_context(|| format!("failed to delete note {}", note.id())),
        DeleteOutcome::Removed { .. } => Ok(true),
    }
}

pub fn handle_remove<R: NoteRepository + ?Sized>(args: &RemoveArgs, repo: &mut R) -> Result<()> {
    let title = require_note(repo, &args.note)?.title().to_string();

    let deleted = if args.yes {
        handle_remove_impl(args, repo, &mut |_: &str| true)?
    } else {
        handle_remove_impl(args, repo, &mut prompt_stdin)?
    };

    if deleted {
        println!("Deleted: {}", title);
    } else {
        println!("Cancelled.");
    }
    Ok(())
}
