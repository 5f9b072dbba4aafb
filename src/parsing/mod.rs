pub mod comment;
pub mod go;
pub mod import;

pub use comment::{DocSections, comment_text};
pub use go::{GoParser, GoRelationshipResolver, ParsedFile, SnippetFormatter};
pub use import::{ANONYMOUS_IMPORT, Import, ImportAlias};
