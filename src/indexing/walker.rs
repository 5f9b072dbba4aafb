//! Package discovery and per-package file listing
//!
//! Two ways to find the package directories of a project:
//! - `go list -f {{.Dir}} ./...`, which honors build constraints and modules
//! - a filesystem walk with .gitignore and `.godocgenignore` support
//!
//! `auto` tries the first and falls back to the second.

use crate::config::{DiscoveryMode, Settings};
use crate::error::{DocError, DocResult};
use crate::parsing::go::parser::is_test_file;
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Custom ignore file honored by the walker, same syntax as .gitignore
pub const IGNORE_FILE: &str = ".godocgenignore";

/// Source of the ordered package directory list
pub trait PackageDiscovery {
    fn name(&self) -> &'static str;

    fn discover(&self, root: &Path) -> DocResult<Vec<PathBuf>>;
}

/// Select the discovery strategy configured in `[discovery] mode`.
pub fn discovery_for(settings: &Settings) -> Box<dyn PackageDiscovery> {
    let walker = WalkDiscovery::new(settings);
    match settings.discovery.mode {
        DiscoveryMode::Auto => Box::new(AutoDiscovery {
            go_list: GoListDiscovery::default(),
            walker,
        }),
        DiscoveryMode::GoList => Box::new(GoListDiscovery::default()),
        DiscoveryMode::Walk => Box::new(walker),
    }
}

/// Runs `go list` in the project directory
pub struct GoListDiscovery {
    binary: String,
}

impl Default for GoListDiscovery {
    fn default() -> Self {
        Self {
            binary: "go".to_string(),
        }
    }
}

impl GoListDiscovery {
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl PackageDiscovery for GoListDiscovery {
    fn name(&self) -> &'static str {
        "go list"
    }

    fn discover(&self, root: &Path) -> DocResult<Vec<PathBuf>> {
        let output = Command::new(&self.binary)
            .args(["list", "-f", "{{.Dir}}", "./..."])
            .current_dir(root)
            .output()
            .map_err(|e| DocError::Discovery {
                path: root.to_path_buf(),
                reason: format!("cannot run '{} list': {e}", self.binary),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DocError::Discovery {
                path: root.to_path_buf(),
                reason: stderr.trim().to_string(),
            });
        }

        Ok(parse_go_list_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// One directory per line; blank lines dropped.
pub fn parse_go_list_output(stdout: &str) -> Vec<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Walks the tree for directories holding non-test `.go` files
#[derive(Debug, Clone)]
pub struct WalkDiscovery {
    ignore_dirs: Vec<String>,
    include_tests: bool,
}

impl WalkDiscovery {
    pub fn new(settings: &Settings) -> Self {
        Self {
            ignore_dirs: settings.discovery.ignore_dirs.clone(),
            include_tests: settings.parsing.include_tests,
        }
    }

    fn skip_dir(&self, name: &str) -> bool {
        name.starts_with('_') || name.starts_with('.') || self.ignore_dirs.iter().any(|d| d == name)
    }
}

impl PackageDiscovery for WalkDiscovery {
    fn name(&self) -> &'static str {
        "walk"
    }

    fn discover(&self, root: &Path) -> DocResult<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(DocError::Discovery {
                path: root.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(true) // Skip hidden files and directories
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .require_git(false); // Allow gitignore to work in non-git directories
        builder.add_custom_ignore_filename(IGNORE_FILE);

        let walker = self.clone();
        builder.filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            if !is_dir || entry.depth() == 0 {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !walker.skip_dir(name))
        });

        let mut packages = BTreeSet::new();
        for entry in builder.build().filter_map(Result::ok) {
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let path = entry.path();
            if !is_go_source(path, self.include_tests) {
                continue;
            }
            if let Some(parent) = path.parent() {
                packages.insert(parent.to_path_buf());
            }
        }

        debug!("walk found {} package directories", packages.len());
        Ok(packages.into_iter().collect())
    }
}

/// `go list` first, the walker when the go tool is missing or fails
pub struct AutoDiscovery {
    go_list: GoListDiscovery,
    walker: WalkDiscovery,
}

impl PackageDiscovery for AutoDiscovery {
    fn name(&self) -> &'static str {
        "auto"
    }

    fn discover(&self, root: &Path) -> DocResult<Vec<PathBuf>> {
        match self.go_list.discover(root) {
            Ok(packages) => Ok(packages),
            Err(e) => {
                warn!("{e}; falling back to directory walk");
                self.walker.discover(root)
            }
        }
    }
}

fn is_go_source(path: &Path, include_tests: bool) -> bool {
    path.extension().is_some_and(|ext| ext == "go") && (include_tests || !is_test_file(path))
}

/// `.go` files directly inside `dir`, sorted by file name.
pub fn package_files(dir: &Path, include_tests: bool) -> DocResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| DocError::FileRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_go_source(path, include_tests))
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_walk_collects_package_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        write(root, "main.go", "package main");
        write(root, "pkg/shapes/circle.go", "package shapes");
        write(root, "pkg/shapes/square.go", "package shapes");
        write(root, "pkg/onlytests/x_test.go", "package onlytests");
        write(root, "vendor/dep/dep.go", "package dep");
        write(root, "_scratch/s.go", "package s");
        write(root, ".hidden/h.go", "package h");
        write(root, "docs/readme.md", "# docs");

        let walker = WalkDiscovery::new(&Settings::default());
        let packages = walker.discover(root).unwrap();

        let relative: Vec<PathBuf> = packages
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(relative, vec![PathBuf::from(""), PathBuf::from("pkg/shapes")]);
    }

    #[test]
    fn test_custom_ignore_file_respected() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        write(root, IGNORE_FILE, "generated/\n");
        write(root, "generated/gen.go", "package generated");
        write(root, "api/api.go", "package api");

        let walker = WalkDiscovery::new(&Settings::default());
        let packages = walker.discover(root).unwrap();

        assert_eq!(packages.len(), 1);
        assert!(packages[0].ends_with("api"));
    }

    #[test]
    fn test_package_files_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        write(root, "b.go", "package p");
        write(root, "a.go", "package p");
        write(root, "a_test.go", "package p");
        write(root, "notes.txt", "");

        let files = package_files(root, false).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.file_name().unwrap()).collect();
        assert_eq!(names, vec!["a.go", "b.go"]);

        assert_eq!(package_files(root, true).unwrap().len(), 3);
    }

    #[test]
    fn test_go_list_output_parsing() {
        let out = "/p\n\n/p/pkg/shapes\n  \n";
        assert_eq!(
            parse_go_list_output(out),
            vec![PathBuf::from("/p"), PathBuf::from("/p/pkg/shapes")]
        );
    }

    #[test]
    fn test_missing_go_binary_is_a_discovery_error() {
        let temp_dir = TempDir::new().unwrap();
        let discovery = GoListDiscovery::with_binary("definitely-not-a-go-binary");
        let err = discovery.discover(temp_dir.path()).unwrap_err();
        assert!(matches!(err, DocError::Discovery { .. }));
    }
}
