//! Configuration for the documentation generator.
//!
//! Layered configuration:
//! - Default values
//! - TOML configuration file (`.godocgen/settings.toml`)
//! - Environment variable overrides
//! - CLI argument overrides (applied by the binary)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `GODOCGEN_` and use double
//! underscores to separate nested levels:
//! - `GODOCGEN_OUTPUT_DIR=site` sets `output_dir`
//! - `GODOCGEN_PARSING__INCLUDE_TESTS=true` sets `parsing.include_tests`
//! - `GODOCGEN_DISCOVERY__MODE=walk` sets `discovery.mode`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding the settings file, relative to the workspace root
pub const CONFIG_DIR: &str = ".godocgen";
pub const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "GODOCGEN_";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Where the generated site is written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Site title; defaults to the project directory name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// README rendered on the index page; defaults to `<project>/README.md`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<PathBuf>,

    /// Global debug mode
    #[serde(default = "default_false")]
    pub debug: bool,

    #[serde(default)]
    pub parsing: ParsingConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ParsingConfig {
    /// Parse `*_test.go` files as part of their package
    #[serde(default = "default_false")]
    pub include_tests: bool,

    /// How `Example:` snippets are pretty-printed
    #[serde(default)]
    pub formatter: FormatterKind,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DiscoveryConfig {
    #[serde(default)]
    pub mode: DiscoveryMode,

    /// Directory names never descended into by the walker
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RenderConfig {
    /// Write the stylesheet into `<output_dir>/static`
    #[serde(default = "default_true")]
    pub copy_assets: bool,
}

/// Snippet formatter selection
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FormatterKind {
    /// Validate with tree-sitter-go and reindent
    #[default]
    Builtin,
    /// Pipe through the external `gofmt` binary
    Gofmt,
    /// Keep snippets verbatim
    None,
}

/// Package discovery strategy
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DiscoveryMode {
    /// `go list`, falling back to the directory walker
    #[default]
    Auto,
    GoList,
    Walk,
}

fn default_version() -> u32 {
    1
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_ignore_dirs() -> Vec<String> {
    vec!["vendor".to_string(), "testdata".to_string()]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            output_dir: default_output_dir(),
            title: None,
            readme: None,
            debug: false,
            parsing: ParsingConfig::default(),
            discovery: DiscoveryConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            include_tests: false,
            formatter: FormatterKind::default(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            mode: DiscoveryMode::default(),
            ignore_dirs: default_ignore_dirs(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { copy_assets: true }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));
        Self::load_from(config_path)
    }

    /// Load configuration using a specific settings file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            // Double underscore separates nesting; single underscores stay in field names
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Find the settings file by looking for `.godocgen` from the current
    /// directory up to the filesystem root.
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(CONFIG_DIR);
            if config_dir.is_dir() {
                return Some(config_dir.join(CONFIG_FILE));
            }
        }

        None
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Effective configuration as TOML, for `godocgen config`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Create a default settings file with helpful comments
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        Self::init_config_file_in(Path::new("."), force)
    }

    pub fn init_config_file_in(
        root: &Path,
        force: bool,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, SETTINGS_TEMPLATE)?;
        Ok(config_path)
    }
}

const SETTINGS_TEMPLATE: &str = r#"# godocgen configuration

# Version of the configuration schema
version = 1

# Output directory for the generated site
output_dir = "dist"

# Site title (defaults to the project directory name)
# title = "My Project"

# README rendered on the index page (defaults to README.md in the project)
# readme = "docs/overview.md"

# Global debug mode
debug = false

[parsing]
# Document *_test.go files too
include_tests = false

# Formatter for Example: snippets: "builtin", "gofmt" or "none"
formatter = "builtin"

[discovery]
# "auto" tries `go list` first and falls back to walking the tree
mode = "auto"

# Directory names skipped while walking
ignore_dirs = ["vendor", "testdata"]

[render]
# Write static/style.css into the output directory
copy_assets = true
"#;
