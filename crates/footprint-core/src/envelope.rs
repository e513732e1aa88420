//! Result envelopes: the single JSON document each CLI invocation prints.
//!
//! Both pipelines produce exactly one envelope per run, either carrying data
//! or a structured error. Envelopes are built once, serialized, and dropped.

use crate::error::ErrorCode;
use serde::{Deserialize, Serialize};

/// Output document of the search aggregator.
///
/// Success: `{email, results, result_count}` (plus `failed_queries` when some
/// queries were skipped). Failure: `{email, results: [], error}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SearchEnvelope<T> {
    /// Aggregation finished; `results` is deduplicated and classified
    Success {
        /// Identifier that was searched
        email: String,
        /// Classified hits in first-seen order
        results: Vec<T>,
        /// Number of entries in `results`
        result_count: usize,
        /// Queries that failed and were skipped
        #[serde(skip_serializing_if = "is_zero")]
        failed_queries: usize,
    },
    /// Aggregation aborted
    Failure {
        /// Identifier that was searched
        email: String,
        /// Always empty
        results: Vec<T>,
        /// Human-readable reason
        error: String,
    },
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl<T> SearchEnvelope<T> {
    /// Build a success envelope.
    #[must_use]
    pub fn success(email: impl Into<String>, results: Vec<T>, failed_queries: usize) -> Self {
        Self::Success {
            email: email.into(),
            result_count: results.len(),
            results,
            failed_queries,
        }
    }

    /// Build a failure envelope with an empty result list.
    #[must_use]
    pub fn failure(email: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Failure {
            email: email.into(),
            results: Vec::new(),
            error: error.into(),
        }
    }

    /// Whether this envelope reports success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Successful enumeration scan document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeReport {
    /// Normalized identifier that was scanned
    pub email: String,
    /// Platforms where the identifier is confirmed registered
    pub used_on: Vec<String>,
    /// Platforms whose check was throttled
    pub rate_limited: Vec<String>,
    /// `used_on.len()`
    pub count: usize,
    /// `used_on.len() + rate_limited.len()`
    pub total_checked: usize,
    /// Completion time in epoch seconds
    pub scan_time: f64,
    /// Always `true` for a report
    pub success: bool,
    /// Summary line
    pub message: String,
    /// Present when the tool exited nonzero but data was extracted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Failure document shared by the enumeration CLI error paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureEnvelope {
    /// Sanitized, user-facing message
    pub error: String,
    /// Closed error code
    pub code: ErrorCode,
    /// Always `false`
    pub success: bool,
}

impl FailureEnvelope {
    /// Build a failure document.
    #[must_use]
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
            success: false,
        }
    }
}

/// Output document of the enumeration runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProbeEnvelope {
    /// Scan produced a report
    Success(ProbeReport),
    /// Scan failed
    Failure(FailureEnvelope),
}

impl ProbeEnvelope {
    /// Whether this envelope reports success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
