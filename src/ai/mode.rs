//! Enhancement modes and their instruction prompts.

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// The kinds of text enhancement the editor can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnhanceMode {
    /// Produce a short summary shown alongside the note.
    Summarize,
    /// Correct grammar and spelling, replacing the content.
    FixGrammar,
    /// Write more text, appended after the current content.
    ContinueWriting,
}

impl EnhanceMode {
    /// Instruction placed in front of the note content.
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Summarize => "Summarize the following markdown content concisely:",
            Self::FixGrammar => {
                "Fix the grammar and spelling in the following markdown text, but keep the format:"
            }
            Self::ContinueWriting => "Continue writing this markdown text creatively:",
        }
    }

    /// Builds the full prompt sent to the service.
    pub fn prompt(&self, text: &str) -> String {
        format!("{}\n\n{}", self.instruction(), text)
    }
}

impl fmt::Display for EnhanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Summarize => "summarize",
            Self::FixGrammar => "fix-grammar",
            Self::ContinueWriting => "continue-writing",
        };
        f.write_str(name)
    }
}
