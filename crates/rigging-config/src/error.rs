//! Error types for configuration loading, validation and assembly.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Mode selection errors
    #[error("unrecognized build mode '{0}' (expected 'development' or 'production')")]
    UnknownMode(String),

    #[error("build mode is not set: provide {0} or --mode")]
    ModeNotSet(&'static str),

    // Required inputs
    #[error("required path '{field}' is missing")]
    MissingPath { field: &'static str },

    #[error("{field} not found: {}", path.display())]
    PathNotFound { field: &'static str, path: PathBuf },

    // Config parsing/loading errors
    #[error("config not found")]
    NotFound,

    #[error("invalid config value for '{field}': {hint}")]
    InvalidValue { field: String, hint: String },

    #[error("invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    // Schema validation errors (no filesystem checks)
    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid_value(field: impl Into<String>, hint: impl ToString) -> Self {
        Self::InvalidValue {
            field: field.into(),
            hint: hint.to_string(),
        }
    }
}
