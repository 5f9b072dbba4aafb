//! Import declarations as shown on package pages

use crate::types::url_slug;
use serde::{Serialize, Serializer};

/// Label shown for blank (`_`) imports
pub const ANONYMOUS_IMPORT: &str = "Anonymous Import";

/// Represents one import spec of a Go file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Import {
    /// Import path without quotes (e.g., "net/http")
    pub path: String,
    /// Path with `/` replaced by `-`
    pub url: String,
    pub alias: ImportAlias,
    /// Comment block above the spec
    pub doc: String,
    /// Trailing comment on the same line
    pub comment: String,
}

/// How an import is bound in the importing file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImportAlias {
    #[default]
    None,
    /// `import name "path"`
    Named(String),
    /// `import . "path"`
    Dot,
    /// `import _ "path"`
    Anonymous,
}

impl ImportAlias {
    /// Display label; empty when the import is unaliased.
    pub fn label(&self) -> &str {
        match self {
            ImportAlias::None => "",
            ImportAlias::Named(name) => name,
            ImportAlias::Dot => ".",
            ImportAlias::Anonymous => ANONYMOUS_IMPORT,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ImportAlias::None)
    }
}

impl Serialize for ImportAlias {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            url: url_slug(&path),
            path,
            alias: ImportAlias::None,
            doc: String::new(),
            comment: String::new(),
        }
    }

    pub fn with_alias(mut self, alias: ImportAlias) -> Self {
        self.alias = alias;
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}
