//! Documented entities and the per-package result handed to renderers.

use crate::parsing::{DocSections, Import};
use crate::types::{EntityKind, PackageInfo};
use serde::Serialize;

/// One documented Go declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub name: String,
    pub kind: EntityKind,

    // HTML-ready documentation sections
    pub description: String,
    pub example: String,
    pub notes: String,
    pub deprecation_note: String,
    pub returns_note: String,

    // Unescaped counterparts for non-HTML consumers
    pub raw_description: String,
    pub raw_deprecation_note: String,

    /// `"name type"` entries, or just `"type"` for unnamed parameters
    pub parameters: Vec<String>,
    pub returns: Vec<String>,
    pub body: String,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<Entity>,
    pub implements: Vec<ImplementationInfo>,
    pub references: Vec<ReferenceInfo>,

    pub package: String,
    pub package_url: String,
    pub package_path: String,
}

/// A named struct field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    /// Raw tag text without the surrounding backticks
    pub tag: String,
}

/// An interface satisfied by a struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImplementationInfo {
    pub interface_name: String,
    pub package: String,
}

/// Edge from an entity to another entity of the same package it mentions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ReferenceInfo {
    pub name: String,
    pub package: String,
    pub package_url: String,
    pub package_path: String,
}

impl Entity {
    pub fn new(name: impl Into<String>, kind: EntityKind, package: &PackageInfo) -> Self {
        Self {
            name: name.into(),
            kind,
            description: String::new(),
            example: String::new(),
            notes: String::new(),
            deprecation_note: String::new(),
            returns_note: String::new(),
            raw_description: String::new(),
            raw_deprecation_note: String::new(),
            parameters: Vec::new(),
            returns: Vec::new(),
            body: String::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            implements: Vec::new(),
            references: Vec::new(),
            package: package.name.clone(),
            package_url: package.url.clone(),
            package_path: package.path.clone(),
        }
    }

    pub fn with_docs(mut self, docs: DocSections) -> Self {
        self.description = docs.description;
        self.example = docs.example;
        self.notes = docs.notes;
        self.deprecation_note = docs.deprecation_note;
        self.returns_note = docs.returns;
        self.raw_description = docs.raw_description;
        self.raw_deprecation_note = docs.raw_deprecation_note;
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<String>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_returns(mut self, returns: Vec<String>) -> Self {
        self.returns = returns;
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_fields(mut self, fields: Vec<FieldInfo>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_methods(mut self, methods: Vec<Entity>) -> Self {
        self.methods = methods;
        self
    }

    /// Name index key (`package.Name`)
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }

    pub fn is_deprecated(&self) -> bool {
        !self.deprecation_note.is_empty()
    }

    /// Type tokens of the parameters, in declaration order.
    pub fn parameter_types(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| type_token(p))
    }

    /// Type tokens of the results, in declaration order.
    pub fn return_types(&self) -> impl Iterator<Item = &str> {
        self.returns.iter().map(|r| type_token(r))
    }

    pub fn method(&self, name: &str) -> Option<&Entity> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Words that can start an unnamed type containing a space (`chan int`,
/// `func() error`, `struct{ A int }`).
const TYPE_KEYWORDS: &[&str] = &["chan", "func", "interface", "map", "struct"];

/// Extract the type part of a `"name type"` entry.
///
/// Entries are split on their first space. An entry whose first word is not a
/// plain identifier, or is a type keyword, is an unnamed type and is returned
/// whole.
pub fn type_token(entry: &str) -> &str {
    match entry.split_once(' ') {
        Some((name, rest)) if is_identifier(name) && !TYPE_KEYWORDS.contains(&name) => rest,
        _ => entry,
    }
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Everything extracted for one package in a single pass
#[derive(Debug, Clone, Serialize)]
pub struct PackageDocs {
    pub info: PackageInfo,
    pub entities: Vec<Entity>,
    pub imports: Vec<Import>,
}

impl PackageDocs {
    pub fn has_kind(&self, kind: EntityKind) -> bool {
        self.entities.iter().any(|e| e.kind == kind)
    }

    pub fn entities_of(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.kind == kind)
    }

    pub fn find(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }
}
