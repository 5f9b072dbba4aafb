//! Whole-site generation: discover packages, document each one, write the
//! index.

use super::{HtmlGenerator, read_readme};
use crate::config::Settings;
use crate::error::{DocError, DocResult};
use crate::indexing::{DocPipeline, PackageSummary, RunStats, discovery_for};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of a generation run, also the `--json` payload
#[derive(Debug, Serialize)]
pub struct SiteReport {
    pub title: String,
    pub project_root: PathBuf,
    pub output_dir: PathBuf,
    pub index: PathBuf,
    pub stats: RunStats,
}

pub struct SiteBuilder<'a> {
    settings: &'a Settings,
    project_root: PathBuf,
    title: String,
}

impl<'a> SiteBuilder<'a> {
    /// Resolve the project root and the site title.
    pub fn new(settings: &'a Settings, project_root: &Path) -> DocResult<Self> {
        let project_root =
            std::fs::canonicalize(project_root).map_err(|source| DocError::FileRead {
                path: project_root.to_path_buf(),
                source,
            })?;
        if !project_root.is_dir() {
            return Err(DocError::Discovery {
                path: project_root,
                reason: "not a directory".to_string(),
            });
        }

        let title = settings.title.clone().unwrap_or_else(|| {
            project_root
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Documentation".to_string())
        });

        Ok(Self {
            settings,
            project_root,
            title,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Package directories in documentation order.
    pub fn discover(&self) -> DocResult<Vec<PathBuf>> {
        let discovery = discovery_for(self.settings);
        debug!("discovering packages with {}", discovery.name());
        discovery.discover(&self.project_root)
    }

    /// Document `packages` into the output directory.
    ///
    /// The output directory is emptied first. `on_package` sees each package
    /// once its page is written.
    pub fn build<F>(&self, packages: &[PathBuf], mut on_package: F) -> DocResult<SiteReport>
    where
        F: FnMut(&PackageSummary),
    {
        let output_dir = self.output_dir()?;
        let generator = HtmlGenerator::new(&output_dir)?;
        generator.clean_output_dir()?;
        if self.settings.render.copy_assets {
            generator.copy_static_assets()?;
        }

        let readme_html = read_readme(self.settings.readme.as_deref(), &self.project_root);

        let mut pipeline = DocPipeline::new(self.settings)?;
        let mut stats = pipeline.run(&self.project_root, packages, |docs| {
            generator.generate_package(docs, &self.title)?;
            on_package(&PackageSummary::from_docs(docs));
            Ok(())
        })?;
        stats.pages_written = stats.packages_documented;

        let package_paths: Vec<String> = stats.packages.iter().map(|p| p.path.clone()).collect();
        let index = generator.generate_index(&package_paths, &self.title, &readme_html)?;
        stats.pages_written += 1;

        info!("site written to {}", output_dir.display());
        Ok(SiteReport {
            title: self.title.clone(),
            project_root: self.project_root.clone(),
            output_dir,
            index,
            stats,
        })
    }

    /// Absolute output directory. Refuses directories that contain the
    /// project, since the output is deleted before each run.
    fn output_dir(&self) -> DocResult<PathBuf> {
        let configured = &self.settings.output_dir;
        let output_dir = if configured.is_absolute() {
            configured.clone()
        } else {
            std::env::current_dir()
                .map_err(|source| DocError::FileRead {
                    path: PathBuf::from("."),
                    source,
                })?
                .join(configured)
        };

        let resolved = std::fs::canonicalize(&output_dir).unwrap_or_else(|_| output_dir.clone());
        if self.project_root.starts_with(&resolved) {
            return Err(DocError::ConfigError {
                reason: format!(
                    "output directory {} contains the project and would be deleted",
                    output_dir.display()
                ),
            });
        }
        Ok(output_dir)
    }
}
