//! Statistics for a documentation run

use crate::symbol::PackageDocs;
use crate::types::EntityKind;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Entity counts for one documented package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    pub name: String,
    pub path: String,
    pub functions: usize,
    pub structs: usize,
    pub interfaces: usize,
    pub types: usize,
    pub imports: usize,
}

impl PackageSummary {
    pub fn from_docs(docs: &PackageDocs) -> Self {
        let count = |kind| docs.entities_of(kind).count();
        Self {
            name: docs.info.name.clone(),
            path: docs.info.path.clone(),
            functions: count(EntityKind::Function),
            structs: count(EntityKind::Struct),
            interfaces: count(EntityKind::Interface),
            types: count(EntityKind::TypeAlias),
            imports: docs.imports.len(),
        }
    }
}

/// Statistics collected while documenting a project
#[derive(Debug, Default, Serialize)]
pub struct RunStats {
    /// Packages parsed and handed to the renderer
    pub packages_documented: usize,

    /// Directories without Go files for this package
    pub packages_skipped: usize,

    /// Top-level entities across all packages (methods count once, on their struct)
    pub entities_found: usize,

    /// Pages written by the renderer, index included
    pub pages_written: usize,

    #[serde(skip)]
    pub elapsed: Duration,

    /// One row per documented package, in run order
    pub packages: Vec<PackageSummary>,

    /// Skipped directories with the reason (limited to first N)
    pub skipped: Vec<(PathBuf, String)>,

    #[serde(skip)]
    start_time: Option<Instant>,
}

impl RunStats {
    /// Create new stats and start timing
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Stop timing and record elapsed time
    pub fn stop_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed = start.elapsed();
            self.start_time = None;
        }
    }

    /// Record a skipped directory (reasons kept for the first 100)
    pub fn add_skipped(&mut self, path: PathBuf, reason: String) {
        if self.skipped.len() < 100 {
            self.skipped.push((path, reason));
        }
        self.packages_skipped += 1;
    }

    pub fn record_package(&mut self, docs: &PackageDocs) {
        self.packages_documented += 1;
        self.entities_found += docs.entities.len();
        self.packages.push(PackageSummary::from_docs(docs));
    }

    /// Display the statistics in a human-readable format
    pub fn display(&self) {
        println!("\nDocumentation Complete:");
        println!("  Packages documented: {}", self.packages_documented);
        println!("  Packages skipped: {}", self.packages_skipped);
        println!("  Entities found: {}", self.entities_found);
        println!("  Pages written: {}", self.pages_written);
        println!("  Time elapsed: {:.2}s", self.elapsed.as_secs_f64());

        if !self.skipped.is_empty() {
            println!("\nSkipped (showing first {}):", self.skipped.len().min(5));
            for (path, reason) in &self.skipped[..5.min(self.skipped.len())] {
                println!("  {}: {}", path.display(), reason);
            }
            if self.skipped.len() > 5 {
                println!("  ... and {} more", self.skipped.len() - 5);
            }
        }
    }
}
