//! Documentation pipeline
//!
//! Runs one package at a time: read and parse its files, build the symbol
//! table, resolve relationships, hand the result to a sink, drop it.

use super::progress::RunStats;
use super::symbol_table::SymbolTable;
use super::walker::package_files;
use crate::config::Settings;
use crate::error::{DocError, DocResult};
use crate::parsing::go::{
    GoParser, GoRelationshipResolver, ParsedFile, SnippetFormatter, formatter_for,
};
use crate::symbol::PackageDocs;
use crate::types::PackageInfo;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct DocPipeline {
    parser: GoParser,
    formatter: Box<dyn SnippetFormatter>,
    include_tests: bool,
}

impl DocPipeline {
    pub fn new(settings: &Settings) -> DocResult<Self> {
        let parser = GoParser::new().map_err(|reason| DocError::ParserInit { reason })?;
        Ok(Self {
            parser,
            formatter: formatter_for(settings.parsing.formatter),
            include_tests: settings.parsing.include_tests,
        })
    }

    /// Parse one package directory and resolve its relationships.
    ///
    /// Any syntax error in any file fails the package.
    pub fn parse_package(&mut self, project_root: &Path, dir: &Path) -> DocResult<PackageDocs> {
        let files = package_files(dir, self.include_tests)?;
        if files.is_empty() {
            return Err(DocError::NoGoFiles {
                path: dir.to_path_buf(),
            });
        }

        let display_path = PackageInfo::new("", dir, project_root).path;
        let mut parsed = Vec::with_capacity(files.len());
        for path in files {
            let source = std::fs::read_to_string(&path).map_err(|source| DocError::FileRead {
                path: path.clone(),
                source,
            })?;
            let file = self.parser.parse(&path, source).map_err(|e| DocError::ParseError {
                package: display_path.clone(),
                path: path.clone(),
                line: e.line,
                column: e.column,
                reason: e.reason,
            })?;
            parsed.push(file);
        }

        let name = select_package_name(&parsed).ok_or_else(|| DocError::NoGoFiles {
            path: dir.to_path_buf(),
        })?;
        let parsed: Vec<ParsedFile> = parsed
            .into_iter()
            .filter(|file| {
                let same = file.package_name() == Some(name.as_str());
                if !same {
                    debug!(
                        "{} declares package {:?}, not {name}; skipped",
                        file.path.display(),
                        file.package_name()
                    );
                }
                same
            })
            .collect();

        let package = PackageInfo::new(name, dir, project_root);
        debug!("parsing package {} ({} files)", package.path, parsed.len());

        let table = SymbolTable::build(package, &parsed, self.formatter.as_ref());
        Ok(GoRelationshipResolver::resolve(table))
    }

    /// Document every package in order. Directories without Go files are
    /// skipped; any other error stops the run.
    pub fn run<F>(
        &mut self,
        project_root: &Path,
        packages: &[PathBuf],
        mut sink: F,
    ) -> DocResult<RunStats>
    where
        F: FnMut(&PackageDocs) -> DocResult<()>,
    {
        let mut stats = RunStats::new();

        for dir in packages {
            let docs = match self.parse_package(project_root, dir) {
                Ok(docs) => docs,
                Err(DocError::NoGoFiles { path }) => {
                    warn!("no Go files in {}; skipped", path.display());
                    stats.add_skipped(path, "no Go files".to_string());
                    continue;
                }
                Err(e) => return Err(e),
            };

            stats.record_package(&docs);
            sink(&docs)?;
        }

        stats.stop_timing();
        info!(
            "documented {} packages ({} entities) in {:.2}s",
            stats.packages_documented,
            stats.entities_found,
            stats.elapsed.as_secs_f64()
        );
        Ok(stats)
    }
}

/// The first package clause that is not an external test package; when a
/// directory holds only `_test` packages, the first one.
fn select_package_name(files: &[ParsedFile]) -> Option<String> {
    let names: Vec<&str> = files.iter().filter_map(|f| f.package_name()).collect();
    names
        .iter()
        .find(|name| !name.ends_with("_test"))
        .or_else(|| names.first())
        .map(|name| name.to_string())
}
