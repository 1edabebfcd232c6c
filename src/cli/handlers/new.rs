//! New note command handler.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use std::io::Read;
use std::path::Path;
use std::process::Command;

use super::show_edit::{CommandEditor, EditorLauncher, edit_content};
use crate::cli::NewArgs;
use crate::cli::config::Config;
use crate::domain::Note;
use crate::store::NoteRepository;
use crate::view::{EditorSession, EditorTarget, Opened};

/// Opens a new-note session, fills in `content` and saves it.
///
/// `None` keeps the default content. When `editor` is given the user edits
/// the content before the first save.
pub(crate) fn create_note<R, E>(
    repo: &mut R,
    content: Option<String>,
    editor: Option<&E>,
    now: DateTime<Utc>,
) -> Result<Note>
where
    R: NoteRepository + ?Sized,
    E: EditorLauncher + ?Sized,
{
    let Opened::Session(mut session) = EditorSession::open(&EditorTarget::New, repo, now) else {
        bail!("failed to start a new note");
    };

    if let Some(content) = content {
        session.set_content(content);
    }
    if let Some(editor) = editor {
        edit_content(&mut session, editor)?;
    }

    session
        .save(repo, now)
        .with_context(|| "failed to save new note")?;
    Ok(session.note().clone())
}

/// Opens a file in the user's configured editor.
pub(crate) fn open_in_editor(path: &Path, config: &Config) -> Result<()> {
    let editor = config.editor();

    // Parse editor command (may include args like "code --wait")
    let parts: Vec<&str> = editor.split_whitespace().collect();
    let Some((cmd, args)) = parts.split_first() else {
        bail!("editor command is empty");
    };

    let status = Command::new(cmd)
        .args(args)
        .arg(path)
        .status()
        .with_context(|| format!("failed to launch editor '{}'", editor))?;

    if !status.success() {
        bail!("editor '{}' exited with non-zero status", editor);
    }

    Ok(())
}

fn read_content(args: &NewArgs) -> Result<Option<String>> {
    if args.stdin {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .with_context(|| "failed to read note content from stdin")?;
        return Ok(Some(content));
    }
    Ok(args.message.clone())
}

pub fn handle_new<R: NoteRepository + ?Sized>(
    args: &NewArgs,
    repo: &mut R,
    config: &Config,
) -> Result<()> {
    let content = read_content(args)?;
    let launcher = CommandEditor(config);
    let editor = args.edit.then_some(&launcher);

    let note = create_note(repo, content, editor, Utc::now())?;

    println!("Created: {} [{}]", note.title(), note.id().prefix());
    Ok(())
}
