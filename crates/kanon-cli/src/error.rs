//! CLI error types with exit code handling
//!
//! Maps every failure to one of the three documented exit codes: structural
//! parse failures (including unreadable input) exit 2, validation failures
//! exit 1, everything else exits 1.

use kanon_core::CoreError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information.
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// The document validated with diagnostics.
    #[error("validation failed with {errors} diagnostic(s)")]
    #[diagnostic(code(kanon::cli::validation))]
    Validation { errors: usize },

    /// The input could not be parsed into a configuration document.
    #[error("could not parse input: {message}")]
    #[diagnostic(code(kanon::cli::parse))]
    Parse { message: String },

    /// The input could not be read at all.
    #[error("could not read input: {message}")]
    #[diagnostic(code(kanon::cli::io))]
    Io { message: String },

    /// Anything else (bad command arguments, serialization failures).
    #[error("{message}")]
    #[diagnostic(code(kanon::cli::error))]
    Other { message: String },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation { .. } => exit_codes::VALIDATION_ERROR,
            CliError::Parse { .. } | CliError::Io { .. } => exit_codes::PARSE_ERROR,
            CliError::Other { .. } => exit_codes::VALIDATION_ERROR,
        }
    }

    pub fn validation(errors: usize) -> Self {
        Self::Validation { errors }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Structural { message } => CliError::Parse { message },
            CoreError::Io(e) => CliError::Io {
                message: e.to_string(),
            },
            CoreError::Canonicalize { message } => CliError::Other { message },
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
