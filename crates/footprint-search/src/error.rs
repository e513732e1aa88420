//! Error types for the search subsystem.

use crate::engine::SearchEngine;
use thiserror::Error;

/// Errors that can occur while planning or issuing search queries.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Engine name not in the supported set
    #[error("unknown search engine: {0}")]
    UnknownEngine(String),

    /// Planner settings out of range
    #[error("invalid search settings: {0}")]
    InvalidSettings(String),

    /// The search API answered with an error
    #[error("search API error ({engine}): status {status}, {message}")]
    Api {
        /// Engine the query targeted
        engine: SearchEngine,
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// The request exceeded the transport timeout
    #[error("search request to {engine} timed out after {seconds}s")]
    Timeout {
        /// Engine the query targeted
        engine: SearchEngine,
        /// Timeout duration in seconds
        seconds: u64,
    },

    /// The response body could not be decoded
    #[error("failed to parse response from {engine}: {message}")]
    Parse {
        /// Engine the query targeted
        engine: SearchEngine,
        /// Error message
        message: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
