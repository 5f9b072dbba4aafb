//! Exit codes for CLI operations following Unix conventions.
//!
//! - `0`: Success
//! - `1`: General error
//! - `3-125`: Specific recoverable errors
//! - `126-255`: Reserved by shell

use crate::error::DocError;

/// Standard exit codes for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Operation succeeded (code 0)
    Success = 0,

    /// Unspecified error occurred (code 1)
    GeneralError = 1,

    /// Nothing to document (code 3)
    NotFound = 3,

    /// A package failed to parse (code 4)
    ParseError = 4,

    /// File I/O error (code 5)
    IoError = 5,

    /// Configuration error (code 6)
    ConfigError = 6,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl ExitCode {
    /// Determine the exit code for a generation run by the number of pages written.
    pub fn from_page_count(pages: usize) -> Self {
        if pages == 0 {
            ExitCode::NotFound
        } else {
            ExitCode::Success
        }
    }

    /// Convert a `DocError` to the appropriate exit code.
    pub fn from_error(error: &DocError) -> Self {
        match error {
            DocError::ParseError { .. } | DocError::ParserInit { .. } => ExitCode::ParseError,
            DocError::FileRead { .. } | DocError::FileWrite { .. } => ExitCode::IoError,
            DocError::ConfigError { .. } => ExitCode::ConfigError,
            DocError::NoGoFiles { .. } => ExitCode::NotFound,

            // Everything else is a general error
            _ => ExitCode::GeneralError,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ExitCode::Success)
    }

    /// Get a human-readable description of the exit code.
    pub fn description(&self) -> &str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::GeneralError => "General error",
            ExitCode::NotFound => "No Go packages found",
            ExitCode::ParseError => "Parse error",
            ExitCode::IoError => "I/O error",
            ExitCode::ConfigError => "Configuration error",
        }
    }
}
