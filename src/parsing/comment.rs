//! Documentation comment handling.
//!
//! Two steps: [`comment_text`] turns the raw comment tokens above a declaration
//! into plain text, and [`DocSections::parse`] splits that text into the
//! sections shown on a package page.

use crate::parsing::go::format::SnippetFormatter;
use tera::escape_html;
use tracing::debug;

/// Structured sections of one documentation comment.
///
/// Every field except the raw ones is HTML-ready.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocSections {
    pub description: String,
    pub example: String,
    pub notes: String,
    pub deprecation_note: String,
    pub returns: String,
    pub raw_description: String,
    pub raw_deprecation_note: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Description,
    Example,
    Notes,
    Deprecated,
    Returns,
}

fn parse_section_marker(line: &str) -> Option<Section> {
    if line.starts_with("Example:") {
        Some(Section::Example)
    } else if line.starts_with("Notes:") {
        Some(Section::Notes)
    } else if line.starts_with("Deprecated:") {
        Some(Section::Deprecated)
    } else if line.starts_with("Returns:") {
        Some(Section::Returns)
    } else {
        None
    }
}

impl DocSections {
    /// Split comment text into sections.
    ///
    /// A marker line switches the current section and is itself dropped, so
    /// text after `Notes:` on the same line is not kept.
    pub fn parse(raw: &str, formatter: &dyn SnippetFormatter) -> Self {
        let mut description = Vec::new();
        let mut example = Vec::new();
        let mut notes = Vec::new();
        let mut deprecated = Vec::new();
        let mut returns = Vec::new();

        let mut current = Section::Description;
        for line in raw.lines() {
            let line = line.trim();
            if let Some(section) = parse_section_marker(line) {
                current = section;
                continue;
            }

            match current {
                Section::Description => {
                    if !line.is_empty() {
                        description.push(line);
                    }
                }
                Section::Example => example.push(line),
                Section::Notes => notes.push(line),
                Section::Deprecated => deprecated.push(line),
                Section::Returns => returns.push(line),
            }
        }

        let deprecated = trim_blank_edges(&deprecated);

        Self {
            description: render_paragraphs(&description),
            example: render_example(&example, formatter),
            notes: render_paragraphs(trim_blank_edges(&notes)),
            deprecation_note: render_paragraphs(deprecated),
            returns: render_paragraphs(trim_blank_edges(&returns)),
            raw_description: description.join("\n"),
            raw_deprecation_note: deprecated.join("\n"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_empty()
            && self.example.is_empty()
            && self.notes.is_empty()
            && self.deprecation_note.is_empty()
            && self.returns.is_empty()
    }
}

fn trim_blank_edges<'a, 'b>(lines: &'b [&'a str]) -> &'b [&'a str] {
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(start, |i| i + 1);
    &lines[start..end]
}

/// One `<p>` per line, escaped, tabs flattened to spaces.
fn render_paragraphs(lines: &[&str]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    lines
        .iter()
        .map(|line| format!("<p>{}</p>", escape_html(line)))
        .collect::<Vec<_>>()
        .join("\n")
        .replace('\t', " ")
}

fn render_example(lines: &[&str], formatter: &dyn SnippetFormatter) -> String {
    let joined = lines.join("\n");
    let snippet = joined.trim();
    if snippet.is_empty() {
        return String::new();
    }

    let formatted = match formatter.format(snippet) {
        Some(formatted) => formatted,
        None => {
            debug!("example snippet kept verbatim");
            snippet.to_string()
        }
    };
    escape_html(&formatted)
}

/// Convert raw comment tokens (`// ...` lines or `/* ... */` blocks, in
/// source order) into plain text.
///
/// Markers and one following space are removed, `//go:` style directives are
/// dropped, trailing whitespace is trimmed, leading and trailing blank lines
/// are removed, and runs of blank lines collapse to one.
pub fn comment_text<S: AsRef<str>>(comments: &[S]) -> String {
    let mut lines: Vec<String> = Vec::new();

    for comment in comments {
        let comment = comment.as_ref();
        if let Some(body) = comment.strip_prefix("//") {
            if is_directive(body) {
                continue;
            }
            let body = body.strip_prefix(' ').unwrap_or(body);
            lines.push(body.trim_end().to_string());
        } else if let Some(body) = comment.strip_prefix("/*") {
            let body = body.strip_suffix("*/").unwrap_or(body);
            lines.extend(body.lines().map(|l| l.trim_end().to_string()));
        }
    }

    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    for line in &lines {
        if line.is_empty() && out.last().is_none_or(|prev| prev.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }

    out.join("\n")
}

/// `//go:generate`, `//line file:1`, `//export Name`, `//nolint:all` and friends.
fn is_directive(body: &str) -> bool {
    if body.starts_with("line ") || body.starts_with("extern ") || body.starts_with("export ") {
        return true;
    }
    // xxx:yyy with lowercase ascii letters or digits, no space before the colon
    match body.split_once(':') {
        Some((head, tail)) => {
            !head.is_empty()
                && head
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
                && tail
                    .bytes()
                    .next()
                    .is_some_and(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        }
        None => false,
    }
}
