//! Core error types for the footprint tools.
//!
//! [`CoreError`] covers failures that happen before any pipeline runs
//! (identifier validation, configuration). [`ErrorCode`] is the closed table
//! of codes a CLI failure document may carry.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Central error type for shared footprint operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The identifier failed shape, length or content checks
    #[error("{0}")]
    Validation(String),

    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// I/O error reading config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Machine-readable failure codes emitted by the enumeration CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No identifier argument was supplied
    MissingEmail,
    /// More than one positional argument was supplied
    TooManyParams,
    /// The identifier was rejected by the guard
    ValidationError,
    /// The external call exceeded its time bound
    TimeoutError,
    /// The external tool was missing or failed without usable output
    RuntimeError,
    /// Anything unanticipated; details are never surfaced
    InternalError,
}

impl ErrorCode {
    /// The wire representation of this code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingEmail => "MISSING_EMAIL",
            Self::TooManyParams => "TOO_MANY_PARAMS",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::TimeoutError => "TIMEOUT_ERROR",
            Self::RuntimeError => "RUNTIME_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
