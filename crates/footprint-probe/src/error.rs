//! Error types for the enumeration subsystem.

use footprint_core::{CoreError, ErrorCode};
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by an enumeration scan.
///
/// The `Display` text of every variant is safe to show to the caller.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The identifier was rejected before any process was spawned
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The tool ran past its bound or reported a timeout itself
    #[error("Scan timed out - please try again")]
    Timeout,

    /// The tool is not installed or not on `PATH`
    #[error("Enumeration tool not available - please install {tool}")]
    ToolUnavailable {
        /// Tool that could not be found
        tool: String,
    },

    /// The tool failed and produced nothing usable; its stderr is logged only
    #[error("Enumeration scan failed")]
    Runtime,

    /// Anything unanticipated; details are logged, never surfaced
    #[error("Internal scan error")]
    Internal,
}

impl ProbeError {
    /// The CLI error code for this failure.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::ValidationError,
            Self::Timeout => ErrorCode::TimeoutError,
            Self::ToolUnavailable { .. } | Self::Runtime => ErrorCode::RuntimeError,
            Self::Internal => ErrorCode::InternalError,
        }
    }
}

impl From<CoreError> for ProbeError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
            other => {
                tracing::error!("unexpected core error during scan: {}", other);
                Self::Internal
            }
        }
    }
}

/// Errors from spawning or waiting on the external process.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The executable could not be found
    #[error("executable not found: {program}")]
    NotFound {
        /// Program that was requested
        program: String,
    },

    /// The process exceeded its wall-clock bound and was killed
    #[error("process timed out after {after:?}")]
    TimedOut {
        /// The bound that was exceeded
        after: Duration,
    },

    /// Any other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for enumeration operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
