//! CLI command definitions and handlers

pub mod config;
pub mod date_arg;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::Deserialize;
use std::path::PathBuf;

use crate::ai::EnhanceMode;
use crate::view::SortOrder;
use output::OutputFormat;

/// daybook - personal markdown notes with a calendar and AI assist
#[derive(Parser, Debug)]
#[command(name = "daybook", version, about, long_about = None)]
pub struct Cli {
    /// Data directory (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Storage backend (overrides config file)
    #[arg(long, value_enum, global = true)]
    pub backend: Option<Backend>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the note collection is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// One JSON file per slot
    #[default]
    File,
    /// A single SQLite database
    Sqlite,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List notes, newest first, optionally filtered by a search query
    #[command(name = "ls")]
    List(ListArgs),

    /// Show a month calendar and the notes created on a day
    #[command(name = "cal")]
    Calendar(CalendarArgs),

    /// Create a new note
    New(NewArgs),

    /// Show a note's contents
    Show(ShowArgs),

    /// Edit a note in your editor ("new" starts a new note)
    Edit(EditArgs),

    /// Delete a note
    #[command(name = "rm")]
    Remove(RemoveArgs),

    /// Export a note as a downloadable document
    Export(ExportArgs),

    /// Render a note as a print-ready HTML page
    Print(PrintArgs),

    /// Summarize, fix or continue a note with the AI service
    Enhance(EnhanceArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Case-insensitive filter on title and content
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order
    #[arg(long, value_enum, default_value_t = SortOrder::Stored)]
    pub sort: SortOrder,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `cal` command
#[derive(Parser, Debug)]
pub struct CalendarArgs {
    /// Month to display (YYYY-MM); defaults to the selected day's month
    #[arg(short, long)]
    pub month: Option<String>,

    /// Selected day (today, yesterday, Nd or YYYY-MM-DD)
    #[arg(long, default_value = "today")]
    pub date: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note content (markdown)
    #[arg(short = 'm', long, conflicts_with = "stdin")]
    pub message: Option<String>,

    /// Read note content from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Open in editor before saving
    #[arg(short, long)]
    pub edit: bool,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID or ID prefix
    pub note: String,

    /// Print rendered HTML instead of markdown
    #[arg(long)]
    pub html: bool,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note ID, ID prefix, or "new"
    pub note: String,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Note ID or ID prefix
    pub note: String,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Note ID or ID prefix
    pub note: String,

    /// Output file or directory (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `print` command
#[derive(Parser, Debug)]
pub struct PrintArgs {
    /// Note ID or ID prefix
    pub note: String,

    /// Output file or directory (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Custom template file
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// CSS theme (default, dark, or path to CSS file)
    #[arg(long)]
    pub theme: Option<String>,
}

/// Arguments for the `enhance` command
#[derive(Parser, Debug)]
pub struct EnhanceArgs {
    /// Note ID or ID prefix
    pub note: String,

    /// What to ask the AI service for
    #[arg(long, value_enum)]
    pub mode: EnhanceMode,

    /// Print the result without saving the note
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
