//! Stylesheets for printable note pages.

use std::path::Path;

use anyhow::{Result, anyhow};

/// Default light stylesheet with print rules.
pub const THEME_DEFAULT: &str = r#"
body {
    font-family: system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    max-width: 760px;
    margin: 0 auto;
    padding: 1.5rem;
    color: #1f2937;
}
h1, h2, h3, h4, h5, h6 { margin-top: 1.4em; margin-bottom: 0.5em; }
a { color: #2563eb; text-decoration: none; }
pre {
    background: #f3f4f6;
    padding: 1rem;
    overflow-x: auto;
    border-radius: 6px;
}
code { font-family: 'SF Mono', Monaco, 'Cascadia Code', monospace; font-size: 0.9em; }
:not(pre) > code { background: #f3f4f6; padding: 0.1rem 0.3rem; border-radius: 3px; }
blockquote { border-left: 3px solid #d1d5db; margin-left: 0; padding-left: 1rem; color: #6b7280; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #e5e7eb; padding: 0.5rem; text-align: left; }
img { max-width: 100%; height: auto; }
.metadata { color: #9ca3af; font-size: 0.85em; margin-bottom: 1.5rem; }
@media print {
    body { max-width: none; padding: 0; color: #000; }
    a { color: #000; text-decoration: underline; }
    pre, blockquote, table, img { page-break-inside: avoid; }
    .metadata { color: #555; }
}
"#;

/// Dark stylesheet for on-screen reading; printing falls back to black on white.
pub const THEME_DARK: &str = r#"
body {
    font-family: system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    max-width: 760px;
    margin: 0 auto;
    padding: 1.5rem;
    background: #1a1a1a;
    color: #e0e0e0;
}
h1, h2, h3, h4, h5, h6 { margin-top: 1.4em; margin-bottom: 0.5em; }
a { color: #6af; text-decoration: none; }
pre { background: #2a2a2a; padding: 1rem; overflow-x: auto; border-radius: 6px; }
code { font-family: 'SF Mono', Monaco, 'Cascadia Code', monospace; font-size: 0.9em; }
:not(pre) > code { background: #333; padding: 0.1rem 0.3rem; border-radius: 3px; }
blockquote { border-left: 3px solid #444; margin-left: 0; padding-left: 1rem; color: #aaa; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #444; padding: 0.5rem; text-align: left; }
img { max-width: 100%; height: auto; }
.metadata { color: #888; font-size: 0.85em; margin-bottom: 1.5rem; }
@media print {
    body { background: #fff; color: #000; max-width: none; padding: 0; }
    pre, :not(pre) > code { background: #f3f3f3; }
}
"#;

/// Gets CSS for the specified theme.
///
/// `theme` is a theme name ("default", "dark") or a path to a CSS file.
/// `None` selects the default theme.
///
/// # Errors
///
/// Returns an error if the theme name is unknown or the CSS file cannot be read.
pub fn get_theme_css(theme: Option<&str>) -> Result<String> {
    match theme {
        None | Some("default") => Ok(THEME_DEFAULT.to_string()),
        Some("dark") => Ok(THEME_DARK.to_string()),
        Some(path) => {
            let path = Path::new(path);
            if path.exists() {
                Ok(std::fs::read_to_string(path)?)
            } else {
                Err(anyhow!(
                    "Unknown theme: '{}'. Use 'default', 'dark', or a path to a CSS file.",
                    path.display()
                ))
            }
        }
    }
}
