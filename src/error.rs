//! Error types for the documentation generator
//!
//! Structured errors built with thiserror. Each variant carries enough context
//! to tell the user which package or file failed and what to try next.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for extraction and rendering
#[derive(Error, Debug)]
pub enum DocError {
    /// File system errors
    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A Go source file with syntax errors. Aborts the whole run.
    #[error("Failed to parse package '{package}' ({path}:{line}:{column}): {reason}")]
    ParseError {
        package: String,
        path: PathBuf,
        line: usize,
        column: usize,
        reason: String,
    },

    #[error("Failed to initialize Go parser: {reason}")]
    ParserInit { reason: String },

    #[error("No Go source files in '{path}'")]
    NoGoFiles { path: PathBuf },

    /// Package discovery errors
    #[error("Package discovery failed in '{path}': {reason}")]
    Discovery { path: PathBuf, reason: String },

    #[error("Template rendering failed for '{template}': {reason}")]
    Template { template: String, reason: String },

    /// Configuration errors
    #[error("Invalid configuration: {reason}")]
    ConfigError { reason: String },

    #[error("{0}")]
    General(String),
}

impl DocError {
    /// Stable identifier for this error type, used in JSON output.
    pub fn status_code(&self) -> String {
        match self {
            Self::FileRead { .. } => "FILE_READ_ERROR",
            Self::FileWrite { .. } => "FILE_WRITE_ERROR",
            Self::ParseError { .. } => "PARSE_ERROR",
            Self::ParserInit { .. } => "PARSER_INIT_ERROR",
            Self::NoGoFiles { .. } => "NO_GO_FILES",
            Self::Discovery { .. } => "DISCOVERY_ERROR",
            Self::Template { .. } => "TEMPLATE_ERROR",
            Self::ConfigError { .. } => "CONFIG_ERROR",
            Self::General(_) => "GENERAL_ERROR",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::ParseError { .. } => vec![
                "Run 'go vet' on the package to locate the syntax error",
                "Exclude the directory with [discovery] ignore_dirs in .godocgen/settings.toml",
            ],
            Self::FileRead { .. } => vec![
                "Check that the file exists and you have read permissions",
                "Ensure the file is not locked by another process",
            ],
            Self::FileWrite { .. } => vec![
                "Check that the output directory is writable",
                "Use --dest to choose another output directory",
            ],
            Self::Discovery { .. } => vec![
                "Make sure the 'go' tool is on PATH, or set [discovery] mode = \"walk\"",
                "Run godocgen from the module root (where go.mod lives)",
            ],
            Self::ConfigError { .. } => vec![
                "Run 'godocgen config' to print the effective configuration",
                "Run 'godocgen init --force' to regenerate the settings file",
            ],
            Self::NoGoFiles { .. } => vec!["Point godocgen at a directory containing .go files"],
            _ => vec![],
        }
    }
}

/// Result type alias for documentation operations
pub type DocResult<T> = Result<T, DocError>;

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context(self, msg: &str) -> Result<T, DocError>;

    /// Add context with a path
    fn with_path(self, path: &std::path::Path) -> Result<T, DocError>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: &str) -> Result<T, DocError> {
        self.map_err(|e| DocError::General(format!("{msg}: {e}")))
    }

    fn with_path(self, path: &std::path::Path) -> Result<T, DocError> {
        self.map_err(|e| DocError::General(format!("Error processing '{}': {}", path.display(), e)))
    }
}

impl From<tera::Error> for DocError {
    fn from(err: tera::Error) -> Self {
        use std::error::Error as _;

        // tera nests the useful message in its source chain
        let mut reason = err.to_string();
        let mut source = err.source();
        while let Some(inner) = source {
            reason = format!("{reason}: {inner}");
            source = inner.source();
        }
        DocError::Template {
            template: String::from("<tera>"),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message_names_package_and_position() {
        let err = DocError::ParseError {
            package: "shapes".to_string(),
            path: PathBuf::from("geo/shapes/circle.go"),
            line: 12,
            column: 5,
            reason: "unexpected token".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("shapes"));
        assert!(message.contains("circle.go:12:5"));
        assert_eq!(err.status_code(), "PARSE_ERROR");
        assert!(!err.recovery_suggestions().is_empty());
    }

    #[test]
    fn test_context_wraps_as_general() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = result.context("copying assets").unwrap_err();
        assert!(matches!(err, DocError::General(ref m) if m == "copying assets: boom"));
    }
}
