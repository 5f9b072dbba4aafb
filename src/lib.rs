//! Static HTML documentation generator for Go projects.
//!
//! Packages are discovered, parsed with tree-sitter one at a time, resolved
//! into [`PackageDocs`] and rendered to a static site.

pub mod config;
pub mod display;
pub mod error;
pub mod generator;
pub mod indexing;
pub mod io;
pub mod logging;
pub mod parsing;
pub mod symbol;
pub mod types;

pub use config::Settings;
pub use error::{DocError, DocResult};
pub use generator::{HtmlGenerator, SiteBuilder, SiteReport};
pub use indexing::{DocPipeline, RunStats};
pub use parsing::GoParser;
pub use symbol::{Entity, PackageDocs};
pub use types::{EntityKind, PackageInfo};
