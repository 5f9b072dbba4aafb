//! Static HTML output
//!
//! One page per package plus an index page. Templates and the stylesheet are
//! compiled into the binary.

pub mod markdown;
pub mod site;

pub use markdown::{DEFAULT_README, markdown_to_html, read_readme};
pub use site::{SiteBuilder, SiteReport};

use crate::error::{DocError, DocResult};
use crate::symbol::PackageDocs;
use crate::types::{EntityKind, url_slug};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use tracing::debug;

const TPL_PACKAGE: &str = include_str!("templates/package.html");
const TPL_INDEX: &str = include_str!("templates/index.html");
const STYLE_CSS: &str = include_str!("templates/static/style.css");

/// Embedded files written under `<output>/static/`
const STATIC_ASSETS: &[(&str, &str)] = &[("style.css", STYLE_CSS)];

/// Entry in the index sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageLink {
    /// Relative package path (`pkg/parser`)
    pub name: String,
    /// Page file name (`pkg-parser.html`)
    pub link: String,
}

pub struct HtmlGenerator {
    tera: Tera,
    output_dir: PathBuf,
}

impl HtmlGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> DocResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template("package.html", TPL_PACKAGE)?;
        tera.add_raw_template("index.html", TPL_INDEX)?;

        Ok(Self {
            tera,
            output_dir: output_dir.into(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Remove the output directory and recreate it empty.
    pub fn clean_output_dir(&self) -> DocResult<()> {
        if self.output_dir.exists() {
            debug!("removing {}", self.output_dir.display());
            std::fs::remove_dir_all(&self.output_dir).map_err(|source| DocError::FileWrite {
                path: self.output_dir.clone(),
                source,
            })?;
        }
        self.ensure_dir(&self.output_dir)
    }

    /// Write the embedded stylesheet to `static/`.
    pub fn copy_static_assets(&self) -> DocResult<()> {
        let static_dir = self.output_dir.join("static");
        self.ensure_dir(&static_dir)?;

        for (name, content) in STATIC_ASSETS {
            self.write_file(&static_dir.join(name), content)?;
        }
        Ok(())
    }

    pub fn render_package(&self, docs: &PackageDocs, title: &str) -> DocResult<String> {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("package_name", &docs.info.name);
        context.insert("package_path", &docs.info.path);
        context.insert("entities", &docs.entities);
        context.insert("imports", &docs.imports);
        context.insert("has_functions", &docs.has_kind(EntityKind::Function));
        context.insert("has_types", &docs.has_kind(EntityKind::TypeAlias));
        context.insert("has_structs", &docs.has_kind(EntityKind::Struct));
        context.insert("has_interfaces", &docs.has_kind(EntityKind::Interface));
        context.insert("has_imports", &!docs.imports.is_empty());

        self.render("package.html", &context)
    }

    /// Write `<package_url>.html` and return its path.
    pub fn generate_package(&self, docs: &PackageDocs, title: &str) -> DocResult<PathBuf> {
        let html = self.render_package(docs, title)?;
        let path = self.output_dir.join(docs.info.page_name());
        self.ensure_dir(&self.output_dir)?;
        self.write_file(&path, &html)?;
        debug!("wrote {}", path.display());
        Ok(path)
    }

    pub fn render_index(
        &self,
        packages: &[String],
        title: &str,
        readme_html: &str,
    ) -> DocResult<String> {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("grouped_packages", &group_packages(packages));
        context.insert("total_packages", &packages.len());
        context.insert("readme_content", readme_html);

        self.render("index.html", &context)
    }

    /// Write `index.html` linking every package path in `packages`.
    pub fn generate_index(
        &self,
        packages: &[String],
        title: &str,
        readme_html: &str,
    ) -> DocResult<PathBuf> {
        let html = self.render_index(packages, title, readme_html)?;
        let path = self.output_dir.join("index.html");
        self.ensure_dir(&self.output_dir)?;
        self.write_file(&path, &html)?;
        Ok(path)
    }

    fn render(&self, template: &str, context: &Context) -> DocResult<String> {
        self.tera
            .render(template, context)
            .map_err(|e| match DocError::from(e) {
                DocError::Template { reason, .. } => DocError::Template {
                    template: template.to_string(),
                    reason,
                },
                other => other,
            })
    }

    fn ensure_dir(&self, dir: &Path) -> DocResult<()> {
        std::fs::create_dir_all(dir).map_err(|source| DocError::FileWrite {
            path: dir.to_path_buf(),
            source,
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> DocResult<()> {
        std::fs::write(path, content).map_err(|source| DocError::FileWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Group package paths by their first segment. Groups and the links inside
/// each group are sorted by name.
pub fn group_packages(packages: &[String]) -> BTreeMap<String, Vec<PackageLink>> {
    let mut groups: BTreeMap<String, Vec<PackageLink>> = BTreeMap::new();

    for package in packages {
        let prefix = package.split('/').next().unwrap_or(package).to_string();
        groups.entry(prefix).or_default().push(PackageLink {
            name: package.clone(),
            link: format!("{}.html", url_slug(package)),
        });
    }

    for links in groups.values_mut() {
        links.sort_by(|a, b| a.name.cmp(&b.name));
    }
    groups
}
