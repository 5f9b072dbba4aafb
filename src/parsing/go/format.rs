//! Printing of Go type expressions and `Example:` snippets.
//!
//! Type expressions are rebuilt from their leaf tokens with gofmt-like
//! spacing (`map[string]int`, `func(a int) error`, `struct{ A int }`).
//! Snippets go through a [`SnippetFormatter`]; every formatter may fail, in
//! which case the caller keeps the original text.

use crate::config::FormatterKind;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, warn};
use tree_sitter::{Language, Node, Parser};

/// Pretty-printer for example snippets. `None` means "keep the input".
pub trait SnippetFormatter {
    fn format(&self, snippet: &str) -> Option<String>;
}

/// Select the formatter configured in `[parsing] formatter`.
pub fn formatter_for(kind: FormatterKind) -> Box<dyn SnippetFormatter> {
    match kind {
        FormatterKind::Builtin => Box::new(BuiltinFormatter::new()),
        FormatterKind::Gofmt => Box::new(GofmtFormatter::default()),
        FormatterKind::None => Box::new(VerbatimFormatter),
    }
}

/// Never formats.
pub struct VerbatimFormatter;

impl SnippetFormatter for VerbatimFormatter {
    fn format(&self, _snippet: &str) -> Option<String> {
        None
    }
}

/// Checks the snippet with tree-sitter-go, then reindents it with tabs.
///
/// Accepts a whole file, a list of top-level declarations, or a list of
/// statements. Only leading indentation changes: spacing inside a line is
/// left as written (`x:=1` stays `x:=1`), and so are the contents of raw
/// strings and block comments. Use [`GofmtFormatter`] for full gofmt output.
pub struct BuiltinFormatter {
    language: Language,
}

impl Default for BuiltinFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinFormatter {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    fn parses_cleanly(&self, source: &str) -> bool {
        let mut parser = Parser::new();
        if parser.set_language(&self.language).is_err() {
            return false;
        }
        parser
            .parse(source, None)
            .is_some_and(|tree| !tree.root_node().has_error())
    }

    fn is_valid_go(&self, snippet: &str) -> bool {
        if snippet.starts_with("package ") && self.parses_cleanly(snippet) {
            return true;
        }
        self.parses_cleanly(&format!("package p\n{snippet}\n"))
            || self.parses_cleanly(&format!("package p\nfunc _() {{\n{snippet}\n}}\n"))
    }
}

impl SnippetFormatter for BuiltinFormatter {
    fn format(&self, snippet: &str) -> Option<String> {
        if !self.is_valid_go(snippet) {
            return None;
        }
        Some(reindent(snippet))
    }
}

/// Pipes the snippet through the `gofmt` binary.
pub struct GofmtFormatter {
    binary: String,
}

impl Default for GofmtFormatter {
    fn default() -> Self {
        Self {
            binary: "gofmt".to_string(),
        }
    }
}

impl SnippetFormatter for GofmtFormatter {
    fn format(&self, snippet: &str) -> Option<String> {
        let mut child = match Command::new(&self.binary)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                warn!("cannot run {}: {e}", self.binary);
                return None;
            }
        };

        child.stdin.take()?.write_all(snippet.as_bytes()).ok()?;
        let output = child.wait_with_output().ok()?;
        if !output.status.success() {
            debug!("gofmt rejected snippet");
            return None;
        }
        String::from_utf8(output.stdout).ok().filter(|s| !s.is_empty())
    }
}

/// Reindent Go source by bracket depth, one tab per level.
///
/// Lines that begin inside a raw string or a block comment are copied as
/// written.
fn reindent(source: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut depth: usize = 0;
    let mut scanner = LineScanner::default();

    for line in source.lines() {
        if scanner.in_literal() {
            out.push(line.to_string());
            depth = (depth as isize + scanner.scan(line)).max(0) as usize;
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            if out.last().is_some_and(|l| !l.is_empty()) {
                out.push(String::new());
            }
            continue;
        }

        let leading_closers = trimmed
            .chars()
            .take_while(|c| matches!(c, '}' | ')' | ']'))
            .count();
        let mut indent = depth.saturating_sub(leading_closers);
        if is_case_clause(trimmed) {
            indent = indent.saturating_sub(1);
        }

        out.push(format!("{}{}", "\t".repeat(indent), trimmed));
        depth = (depth as isize + scanner.scan(trimmed)).max(0) as usize;
    }

    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }

    let mut result = out.join("\n");
    result.push('\n');
    result
}

fn is_case_clause(line: &str) -> bool {
    line.starts_with("case ") || line.starts_with("default:")
}

/// Bracket counter that remembers an open raw string or block comment
/// from one line to the next.
#[derive(Debug, Default)]
struct LineScanner {
    in_raw_string: bool,
    in_block_comment: bool,
}

impl LineScanner {
    fn in_literal(&self) -> bool {
        self.in_raw_string || self.in_block_comment
    }

    /// Net open brackets on a line, ignoring strings, runes and comments.
    fn scan(&mut self, line: &str) -> isize {
        let mut delta = 0;
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            if self.in_raw_string {
                if c == '`' {
                    self.in_raw_string = false;
                }
                continue;
            }
            if self.in_block_comment {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    self.in_block_comment = false;
                }
                continue;
            }

            match c {
                '{' | '(' | '[' => delta += 1,
                '}' | ')' | ']' => delta -= 1,
                '/' if chars.peek() == Some(&'/') => break,
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    self.in_block_comment = true;
                }
                '`' => self.in_raw_string = true,
                '"' | '\'' => {
                    while let Some(inner) = chars.next() {
                        if inner == '\\' {
                            chars.next();
                        } else if inner == c {
                            break;
                        }
                    }
                }
                _ => {}
            }
        }

        delta
    }
}

/// Net open brackets on a single line.
#[cfg(test)]
fn bracket_delta(line: &str) -> isize {
    LineScanner::default().scan(line)
}

// ---------------------------------------------------------------------------
// Type expressions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Token(&'a str),
    Space,
    Terminator,
}

/// Print a type expression node. Returns an empty string if the node
/// contains syntax errors.
pub fn format_type(node: Node, source: &str) -> String {
    if node.has_error() {
        return String::new();
    }
    let mut pieces = Vec::new();
    collect_pieces(node, source, &mut pieces);
    join_pieces(&pieces)
}

/// Receiver type with generic arguments removed: `*List[T]` -> `*List`.
pub fn receiver_key(node: Node, source: &str) -> String {
    let formatted = format_type(node, source);
    match formatted.find('[') {
        Some(idx) => formatted[..idx].to_string(),
        None => formatted,
    }
}

fn is_atomic(kind: &str) -> bool {
    matches!(
        kind,
        "interpreted_string_literal" | "raw_string_literal" | "rune_literal"
    )
}

fn collect_pieces<'a>(node: Node, source: &'a str, out: &mut Vec<Piece<'a>>) {
    let kind = node.kind();
    if kind == "comment" {
        return;
    }

    if node.child_count() == 0 || is_atomic(kind) {
        let text = &source[node.byte_range()];
        match kind {
            "\n" | ";" | "\0" => out.push(Piece::Terminator),
            _ if text.is_empty() => {}
            _ => out.push(Piece::Token(text)),
        }
        return;
    }

    // Declarations where names are separated from their type by a space
    let spaced = matches!(
        kind,
        "parameter_declaration" | "variadic_parameter_declaration" | "field_declaration"
    );
    let mut saw_name = false;
    let mut spaced_after_name = false;

    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            if spaced {
                match cursor.field_name() {
                    Some("name") => saw_name = true,
                    Some("tag") => out.push(Piece::Space),
                    _ if saw_name && !spaced_after_name && child.kind() != "," => {
                        out.push(Piece::Space);
                        spaced_after_name = true;
                    }
                    _ => {}
                }
            }
            collect_pieces(child, source, out);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
}

fn join_pieces(pieces: &[Piece]) -> String {
    // Terminators become `;` only between two elements of a braced list
    let mut tokens: Vec<(&str, bool)> = Vec::new();
    let mut force_space = false;
    for (i, piece) in pieces.iter().enumerate() {
        match piece {
            Piece::Space => force_space = true,
            Piece::Token(text) => {
                tokens.push((text, force_space));
                force_space = false;
            }
            Piece::Terminator => {
                let prev = tokens.last().map(|(t, _)| *t);
                let next = pieces[i + 1..].iter().find_map(|p| match p {
                    Piece::Token(t) => Some(*t),
                    _ => None,
                });
                let useful = matches!(prev, Some(p) if p != "{" && p != ";")
                    && matches!(next, Some(n) if n != "}");
                if useful {
                    tokens.push((";", false));
                }
            }
        }
    }

    let mut out = String::new();
    let mut prev: Option<&str> = None;
    for (token, forced) in tokens {
        if prev.is_some_and(|p| forced || needs_space(p, token)) {
            out.push(' ');
        }
        out.push_str(token);
        prev = Some(token);
    }
    out
}

fn is_word(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

fn needs_space(prev: &str, next: &str) -> bool {
    match (prev, next) {
        ("," | ";", _) => true,
        ("|", _) | (_, "|") => true,
        ("{", n) => n != "}",
        (p, "}") => p != "{",
        ("chan", n) => n != "<-",
        ("<-", n) => n != "chan",
        (")", n) => is_word(n) || matches!(n, "*" | "[" | "(" | "<-"),
        (p, n) => is_word(p) && is_word(n),
    }
}
