//! Helpers for Go parsing unit tests
//!
//! Build Go sources, run them through the full per-package pass and assert
//! on the resulting entities.

use std::path::{Path, PathBuf};
use thiserror::Error;

use super::format::{BuiltinFormatter, SnippetFormatter};
use super::parser::GoParser;
use super::resolution::GoRelationshipResolver;
use crate::indexing::SymbolTable;
use crate::symbol::{Entity, PackageDocs};
use crate::types::{EntityKind, PackageInfo};

#[derive(Error, Debug)]
pub enum GoTestError {
    #[error(
        "Parser initialization failed: {0}\nSuggestion: Check that tree-sitter-go is properly configured"
    )]
    InitializationFailed(String),

    #[error("Source did not parse: {0}\nSuggestion: Check the Go snippet for syntax errors")]
    SyntaxError(String),

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),
}

/// Assembles a Go file from parts
#[derive(Default)]
pub struct GoCodeBuilder {
    package: Option<String>,
    imports: Vec<String>,
    declarations: Vec<String>,
}

impl GoCodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// One import spec, written as it would appear inside `import (...)`.
    pub fn with_import(mut self, import: impl Into<String>) -> Self {
        self.imports.push(import.into());
        self
    }

    pub fn with_type(mut self, type_decl: impl Into<String>) -> Self {
        self.declarations.push(type_decl.into());
        self
    }

    pub fn with_function(mut self, func_decl: impl Into<String>) -> Self {
        self.declarations.push(func_decl.into());
        self
    }

    pub fn build(self) -> String {
        let mut code = format!("package {}\n", self.package.as_deref().unwrap_or("main"));

        match self.imports.len() {
            0 => {}
            1 => code.push_str(&format!("\nimport {}\n", self.imports[0])),
            _ => {
                code.push_str("\nimport (\n");
                for import in &self.imports {
                    code.push_str(&format!("\t{import}\n"));
                }
                code.push_str(")\n");
            }
        }

        for decl in &self.declarations {
            code.push('\n');
            code.push_str(decl);
            code.push('\n');
        }

        code
    }
}

/// Parse one file as a whole package rooted at `/project/<package>`.
pub fn parse_go_code(code: &str) -> Result<PackageDocs, GoTestError> {
    parse_go_files(&[("main.go", code)])
}

/// Parse several files (given in order) as one package.
pub fn parse_go_files(files: &[(&str, &str)]) -> Result<PackageDocs, GoTestError> {
    parse_go_files_with(files, &BuiltinFormatter::new())
}

pub fn parse_go_files_with(
    files: &[(&str, &str)],
    formatter: &dyn SnippetFormatter,
) -> Result<PackageDocs, GoTestError> {
    let mut parser = GoParser::new().map_err(GoTestError::InitializationFailed)?;

    let mut parsed = Vec::new();
    for (name, code) in files {
        let file = parser
            .parse(Path::new(name), code.to_string())
            .map_err(|e| {
                GoTestError::SyntaxError(format!("{name}:{}:{} {}", e.line, e.column, e.reason))
            })?;
        parsed.push(file);
    }

    let name = parsed
        .first()
        .and_then(|f| f.package_name())
        .unwrap_or("main")
        .to_string();
    let root = PathBuf::from("/project");
    let package = PackageInfo::new(name.clone(), &root.join(&name), &root);

    let table = SymbolTable::build(package, &parsed, formatter);
    Ok(GoRelationshipResolver::resolve(table))
}

pub fn filter_by_kind(docs: &PackageDocs, kind: EntityKind) -> Vec<&Entity> {
    docs.entities_of(kind).collect()
}

pub fn find_entity<'a>(docs: &'a PackageDocs, name: &str) -> Result<&'a Entity, GoTestError> {
    docs.find(name)
        .ok_or_else(|| GoTestError::AssertionFailed(format!("entity '{name}' not found")))
}

pub fn assert_entity_exists(
    docs: &PackageDocs,
    name: &str,
    kind: EntityKind,
) -> Result<(), GoTestError> {
    let entity = find_entity(docs, name)?;
    if entity.kind != kind {
        return Err(GoTestError::AssertionFailed(format!(
            "'{name}' is a {}, expected {kind}",
            entity.kind
        )));
    }
    Ok(())
}

pub fn assert_implements(
    docs: &PackageDocs,
    struct_name: &str,
    interface: &str,
) -> Result<(), GoTestError> {
    let entity = find_entity(docs, struct_name)?;
    if entity.implements.iter().any(|i| i.interface_name == interface) {
        Ok(())
    } else {
        Err(GoTestError::AssertionFailed(format!(
            "'{struct_name}' does not implement '{interface}' (implements {:?})",
            entity
                .implements
                .iter()
                .map(|i| i.interface_name.as_str())
                .collect::<Vec<_>>()
        )))
    }
}

pub fn method_names(entity: &Entity) -> Vec<&str> {
    entity.methods.iter().map(|m| m.name.as_str()).collect()
}

pub fn reference_names(entity: &Entity) -> Vec<&str> {
    entity.references.iter().map(|r| r.name.as_str()).collect()
}

/// Reusable Go sources
pub mod snippets {
    pub const SHAPES: &str = r#"package shapes

import "math"

// Shape is anything with an area.
type Shape interface {
	Area() float64
}

// Circle is a round Shape.
type Circle struct {
	Radius float64 `json:"radius"`
}

// Area of the circle.
func (c Circle) Area() float64 {
	return math.Pi * c.Radius * c.Radius
}

// Unit returns the circle with radius one.
func Unit() Circle {
	return Circle{Radius: 1}
}
"#;

    pub const MIXED_RECEIVERS: &str = r#"package shapes

type Square struct {
	Side float64
}

func (s Square) Area() float64 { return s.Side * s.Side }

func (s *Square) Grow(by float64) { s.Side += by }

type Counter struct{ n int }

func (c *Counter) Inc() { c.n++ }

func (c *Counter) Value() int { return c.n }
"#;

    pub const DOCUMENTED: &str = r#"package docs

// Parse reads a config.
// It accepts TOML & JSON.
//
// Example:
//     cfg, err := Parse("a = 1")
//     if err != nil {
//     return err
//     }
//
// Notes:
// Keys are case sensitive.
//
// Returns:
// The parsed config.
//
// Deprecated:
// Use Load instead.
func Parse(input string) (Config, error) {
	return Config{}, nil
}

// Config holds settings.
//
// Example:
// this is not { valid go
type Config struct{}
"#;
}
