use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Kind of a documented Go declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Function,
    Method,
    Struct,
    Interface,
    /// Any named type whose underlying shape is neither a struct nor an interface
    /// (named primitives, function types, aliases, generic instantiations)
    #[serde(rename = "type")]
    TypeAlias,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Function => "function",
            EntityKind::Method => "method",
            EntityKind::Struct => "struct",
            EntityKind::Interface => "interface",
            EntityKind::TypeAlias => "type",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance of one Go package inside the documented project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    /// Name from the `package` clause
    pub name: String,
    /// Directory relative to the project root, `/`-separated (`.` for the root)
    pub path: String,
    /// Page slug: the relative path with separators replaced by `-`
    pub url: String,
    /// Absolute directory on disk
    #[serde(skip)]
    pub dir: PathBuf,
}

impl PackageInfo {
    pub fn new(name: impl Into<String>, dir: &Path, project_root: &Path) -> Self {
        let path = relative_package_path(dir, project_root);
        Self {
            name: name.into(),
            url: url_slug(&path),
            path,
            dir: dir.to_path_buf(),
        }
    }

    /// Key used by the per-package name index (`package.Name`).
    pub fn qualify(&self, name: &str) -> String {
        format!("{}.{}", self.name, name)
    }

    /// File name of the rendered page for this package.
    pub fn page_name(&self) -> String {
        format!("{}.html", self.url)
    }
}

/// Replace path separators with `-` so nested packages map to flat file names.
pub fn url_slug(path: &str) -> String {
    path.replace(['/', '\\'], "-")
}

fn relative_package_path(dir: &Path, project_root: &Path) -> String {
    let relative = dir.strip_prefix(project_root).unwrap_or(dir);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
