//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// The raw input could not be parsed into a configuration mapping at all.
    /// This is the pre-validation structural failure: no field-level checks
    /// can run against it, so no diagnostics are produced.
    #[error("Structural error: {message}")]
    Structural { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A fully validated document failed to canonicalize into the typed
    /// model. This indicates a registry/model mismatch, not bad input.
    #[error("Failed to build canonical configuration: {message}")]
    Canonicalize { message: String },
}

impl CoreError {
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
