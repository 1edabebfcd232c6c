//! Downloadable document export.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::Note;

/// Mime type the document is labelled with.
pub const DOCUMENT_MIME: &str = "text/html";

/// A note's content packaged as a downloadable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub filename: String,
    pub mime: &'static str,
    pub body: String,
}

impl ExportedDocument {
    /// Packages the raw markdown of `note`.
    ///
    /// The file is named after the title, or `note.html` before the first save.
    pub fn from_note(note: &Note) -> Self {
        let stem = if note.title().is_empty() {
            "note".to_string()
        } else {
            note.title().replace(['/', '\\'], "-")
        };

        Self {
            filename: format!("{stem}.html"),
            mime: DOCUMENT_MIME,
            body: note.content().to_string(),
        }
    }

    /// Writes the document to `output`.
    ///
    /// An existing directory, a path ending in `/`, or a path without an
    /// extension is treated as a directory and the document's file name is
    /// appended. Returns the path written.
    pub fn write_to(&self, output: &Path) -> Result<PathBuf> {
        let is_dir = output.is_dir()
            || output.to_string_lossy().ends_with('/')
            || output.extension().is_none();

        let path = if is_dir {
            std::fs::create_dir_all(output)
                .with_context(|| format!("failed to create {}", output.display()))?;
            output.join(&self.filename)
        } else {
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            output.to_path_buf()
        };

        std::fs::write(&path, &self.body)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}
