//! Handlers for the `export` and `print` commands.

use anyhow::{Result, bail};
use chrono::Utc;

use super::resolve::require_note;
use crate::cli::{ExportArgs, PrintArgs};
use crate::export::{ExportedDocument, PrintOptions};
use crate::store::NoteRepository;
use crate::view::{EditorSession, EditorTarget, Opened};

fn open_session<R: NoteRepository + ?Sized>(repo: &R, identifier: &str) -> Result<EditorSession> {
    let note = require_note(repo, identifier)?;
    match EditorSession::open(&EditorTarget::Existing(note.id().clone()), repo, Utc::now()) {
        Opened::Session(session) => Ok(session),
        Opened::Redirect(_) => bail!("note not found: '{}'", identifier),
    }
}

fn emit(doc: &ExportedDocument, output: Option<&std::path::Path>, title: &str) -> Result<()> {
    match output {
        Some(path) => {
            let written = doc.write_to(path)?;
            println!("Exported '{}' to {}", title, written.display());
        }
        None => print!("{}", doc.body),
    }
    Ok(())
}

/// Writes the note's markdown as a downloadable document.
pub fn handle_export<R: NoteRepository + ?Sized>(args: &ExportArgs, repo: &R) -> Result<()> {
    let session = open_session(repo, &args.note)?;
    let doc = session.export_document();
    emit(&doc, args.output.as_deref(), session.note().title())
}

/// Writes the print-formatted page for the note.
pub fn handle_print<R: NoteRepository + ?Sized>(args: &PrintArgs, repo: &R) -> Result<()> {
    let mut session = open_session(repo, &args.note)?;

    let options = PrintOptions {
        template_path: args.template.as_deref(),
        theme: args.theme.as_deref(),
    };
    let html = session.print_document(&options)?;

    let doc = ExportedDocument {
        body: html,
        ..session.export_document()
    };
    emit(&doc, args.output.as_deref(), session.note().title())
}
