//! Enhance command handler.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};

use super::resolve::require_note;
use crate::ai::{GeminiClient, TextEnhancer};
use crate::cli::EnhanceArgs;
use crate::cli::config::Config;
use crate::domain::Note;
use crate::store::NoteRepository;
use crate::view::{EditorSession, EditorTarget, EnhanceOutcome, Opened};

/// What an enhancement did to a note.
#[derive(Debug)]
pub(crate) struct EnhanceReport {
    pub outcome: EnhanceOutcome,
    /// The note after the enhancement was applied.
    pub note: Note,
    pub saved: bool,
}

/// Runs one enhancement on a current-thread runtime.
///
/// Changed content is saved unless `args.dry_run` is set. A failed request
/// is reported in the outcome, not as an error.
pub(crate) fn handle_enhance_impl<R, E>(
    args: &EnhanceArgs,
    repo: &mut R,
    enhancer: &E,
    now: DateTime<Utc>,
) -> Result<EnhanceReport>
where
    R: NoteRepository + ?Sized,
    E: TextEnhancer + ?Sized,
{
    let note = require_note(repo, &args.note)?;
    let target = EditorTarget::Existing(note.id().clone());
    let Opened::Session(mut session) = EditorSession::open(&target, repo, now) else {
        bail!("note not found: '{}'", args.note);
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .with_context(|| "failed to start async runtime")?;
    let outcome = runtime.block_on(session.enhance(enhancer, args.mode))?;

    let changed = matches!(outcome, EnhanceOutcome::Replaced | EnhanceOutcome::Appended);
    let saved = changed && !args.dry_run;
    if saved {
        session
            .save(repo, now)
            .with_context(|| "failed to save enhanced note")?;
    }

    Ok(EnhanceReport {
        outcome,
        note: session.note().clone(),
        saved,
    })
}

pub fn handle_enhance<R: NoteRepository + ?Sized>(
    args: &EnhanceArgs,
    repo: &mut R,
    config: &Config,
) -> Result<()> {
    let client = GeminiClient::new(config.gemini_config());
    let report = handle_enhance_impl(args, repo, &client, Utc::now())?;

    match &report.outcome {
        EnhanceOutcome::Summary(text) => println!("{}", text),
        EnhanceOutcome::Failed(notice) => eprintln!("{}", notice),
        EnhanceOutcome::Replaced | EnhanceOutcome::Appended if report.saved => {
            println!(
                "Saved: {} [{}]",
                report.note.title(),
                report.note.id().prefix()
            );
        }
        EnhanceOutcome::Replaced | EnhanceOutcome::Appended => {
            println!("{}", report.note.content());
        }
    }

    Ok(())
}
