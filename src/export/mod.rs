//! Export of notes as downloadable documents and printable pages.

mod document;
mod html;
pub mod template;
mod theme;

pub use document::{DOCUMENT_MIME, ExportedDocument};
pub use html::markdown_to_html;
pub use template::{DEFAULT_PRINT_TEMPLATE, PrintOptions, render_print_html};
pub use theme::{THEME_DARK, THEME_DEFAULT, get_theme_css};
