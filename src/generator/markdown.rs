//! README rendering for the index page.

use pulldown_cmark::{Options, Parser, html};
use regex::{Captures, Regex};
use std::path::Path;
use tracing::{debug, warn};

/// Shown when the project has no README.
pub const DEFAULT_README: &str = r#"# Welcome to the Documentation

This is the generated documentation for the project. Add a README.md to replace this page.

## Replacing this page

1. Create a README.md file in the root of your project.
2. Write it in standard Markdown.
3. Run godocgen again, or point `--readme` at another Markdown file.
"#;

/// Opening tags and the attributes injected into them.
const CLASS_INJECTIONS: &[(&str, &str)] = &[
    ("<h1", r#"<h1 class="md-h1""#),
    ("<h2", r#"<h2 class="md-h2""#),
    ("<h3", r#"<h3 class="md-h3""#),
    ("<p>", r#"<p class="md-p">"#),
    ("<ul>", r#"<ul class="md-ul">"#),
    ("<ol>", r#"<ol class="md-ol">"#),
    ("<li>", r#"<li class="md-li">"#),
    ("<code>", r#"<code class="md-code">"#),
    ("<th>", r#"<th class="md-th">"#),
    ("<a ", r#"<a target="_blank" "#),
];

const IMG_PATTERN: &str = r#"<img[^>]*src="([^"]*)"[^>]*>"#;

/// Convert Markdown to HTML, add styling classes and drop images whose
/// source is not an absolute http(s) URL.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut rendered = String::new();
    html::push_html(&mut rendered, parser);

    // <pre><code> keeps the plain code tag
    let rendered =
        inject_classes(&rendered).replace(r#"<pre><code class="md-code">"#, "<pre><code>");
    strip_relative_images(&rendered)
}

fn inject_classes(rendered: &str) -> String {
    CLASS_INJECTIONS
        .iter()
        .fold(rendered.to_string(), |html, (tag, replacement)| {
            html.replace(tag, replacement)
        })
}

fn strip_relative_images(rendered: &str) -> String {
    let re = match Regex::new(IMG_PATTERN) {
        Ok(re) => re,
        Err(e) => {
            warn!("image filter unavailable: {e}");
            return rendered.to_string();
        }
    };

    re.replace_all(rendered, |caps: &Captures| {
        let src = &caps[1];
        if src.starts_with("http://") || src.starts_with("https://") {
            caps[0].to_string()
        } else {
            debug!("dropping relative image {src}");
            String::new()
        }
    })
    .into_owned()
}

/// Render the README for the index page.
///
/// Uses `custom` when given, otherwise `README.md` in the project root. A
/// missing or unreadable file falls back to [`DEFAULT_README`].
pub fn read_readme(custom: Option<&Path>, project_root: &Path) -> String {
    let path = custom
        .map(Path::to_path_buf)
        .unwrap_or_else(|| project_root.join("README.md"));

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            debug!("rendering README from {}", path.display());
            markdown_to_html(&content)
        }
        Err(e) => {
            warn!("README not found at {} ({e}); using default content", path.display());
            markdown_to_html(DEFAULT_README)
        }
    }
}
