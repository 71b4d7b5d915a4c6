//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// No input file matched the given patterns
    NoInputFiles,
    /// Invalid file pattern
    InvalidPattern(String),
    /// Malformed stimulus line
    MalformedLine {
        /// File the line came from
        file: String,
        /// 1-based line number
        line: usize,
        /// What was wrong
        reason: String,
    },
    /// Configuration error
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NoInputFiles => {
                write!(f, "No files found matching the provided patterns")
            }
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::MalformedLine { file, line, reason } => {
                write!(f, "{file}:{line}: {reason}")
            }
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
