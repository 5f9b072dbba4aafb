//! Go language support
//!
//! Built on tree-sitter-go (ABI-15). The pipeline for one package is:
//!
//! - [`parser`]: parse files, reject syntax errors, list declarations, imports
//!   and doc comments
//! - [`extractors`]: classify each declaration and turn it into an `Entity`
//! - [`format`]: print type expressions and format `Example:` snippets
//! - [`resolution`]: attach methods, compute interface satisfaction and
//!   same-package references
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use godocgen::parsing::go::GoParser;
//! use std::path::Path;
//!
//! let mut parser = GoParser::new().unwrap();
//! let file = parser
//!     .parse(Path::new("shapes.go"), "package shapes\n".to_string())
//!     .unwrap();
//! assert_eq!(file.package_name(), Some("shapes"));
//! ```

pub mod extractors;
pub mod format;
pub mod parser;
pub mod resolution;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use extractors::{EntityExtractor, ExtractContext, classify, extractor_for};
pub use format::{
    BuiltinFormatter, GofmtFormatter, SnippetFormatter, VerbatimFormatter, formatter_for,
};
pub use parser::{Declaration, GoParser, ParsedFile, SyntaxError};
pub use resolution::GoRelationshipResolver;
