//! Print-formatted HTML rendering.

use std::path::Path;

use anyhow::Result;
use chrono::Local;
use minijinja::{Environment, context};

use crate::domain::Note;
use crate::export::html::markdown_to_html;
use crate::export::theme::get_theme_css;

/// Default page template for printing a note.
pub const DEFAULT_PRINT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{{ title|e }}</title>
    <style>{{ theme_css }}</style>
</head>
<body>
    <article>
        <div class="metadata">
            <time datetime="{{ created_iso }}">{{ created }}</time>
            {% if updated != created %}
            · Updated <time datetime="{{ updated_iso }}">{{ updated }}</time>
            {% endif %}
        </div>
        <main>{{ content }}</main>
    </article>
</body>
</html>"##;

/// Options for rendering a printable page.
#[derive(Default)]
pub struct PrintOptions<'a> {
    /// Path to custom template file.
    pub template_path: Option<&'a Path>,
    /// Theme name or path to CSS file.
    pub theme: Option<&'a str>,
}

/// Renders a note's markdown to a complete, print-ready HTML document.
///
/// The rendered body is the same markdown rendering the preview mode shows.
/// Page dates are shown in local time, like `show` and `ls`.
pub fn render_print_html(note: &Note, options: &PrintOptions) -> Result<String> {
    let content = markdown_to_html(note.content());
    let theme_css = get_theme_css(options.theme)?;

    let template_str = match options.template_path {
        Some(p) => std::fs::read_to_string(p)?,
        None => DEFAULT_PRINT_TEMPLATE.to_string(),
    };

    let mut env = Environment::new();
    env.add_template("print", &template_str)?;
    let tmpl = env.get_template("print")?;

    let title = if note.title().is_empty() {
        crate::domain::derive_title(note.content())
    } else {
        note.title().to_string()
    };

    let html = tmpl.render(context! {
        title => title,
        content => content,
        theme_css => theme_css,
        created => note.created().with_timezone(&Local).format("%Y-%m-%d").to_string(),
        created_iso => note.created().to_rfc3339(),
        updated => note.updated().with_timezone(&Local).format("%Y-%m-%d").to_string(),
        updated_iso => note.updated().to_rfc3339(),
    })?;

    Ok(html)
}
