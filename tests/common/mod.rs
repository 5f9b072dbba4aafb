#![allow(dead_code)]

use godocgen::Settings;
use godocgen::config::DiscoveryMode;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A Go project in a temporary directory, with a sibling output directory
pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("project")).expect("Failed to create project dir");
        Self { dir }
    }

    /// Copy a fixture tree from `tests/fixtures/go/<name>`.
    pub fn from_fixture(name: &str) -> Self {
        let project = Self::new();
        let source = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures/go")
            .join(name);
        copy_tree(&source, &project.path());
        project
    }

    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.path().join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("project")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("site")
    }

    /// Defaults with the walker and the temp output directory.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        settings.output_dir = self.output_dir();
        settings.discovery.mode = DiscoveryMode::Walk;
        settings
    }

    pub fn read_output(&self, name: &str) -> String {
        fs::read_to_string(self.output_dir().join(name))
            .unwrap_or_else(|e| panic!("missing output {name}: {e}"))
    }
}

fn copy_tree(from: &Path, to: &Path) {
    for entry in fs::read_dir(from).expect("Failed to read fixture dir") {
        let entry = entry.expect("Failed to read fixture entry");
        let target = to.join(entry.file_name());
        if entry.path().is_dir() {
            fs::create_dir_all(&target).expect("Failed to create fixture subdir");
            copy_tree(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).expect("Failed to copy fixture file");
        }
    }
}
