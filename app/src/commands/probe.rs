//! Account enumeration command.

use footprint_core::{ErrorCode, FailureEnvelope, ProbeEnvelope};
use footprint_probe::ProbeOrchestrator;

/// Pick the single identifier out of the positional arguments.
///
/// # Errors
/// A `MISSING_EMAIL` or `TOO_MANY_PARAMS` envelope when there is not exactly one.
pub fn select_identifier(args: &[String]) -> Result<&str, FailureEnvelope> {
    match args {
        [] => Err(FailureEnvelope::new(
            ErrorCode::MissingEmail,
            "Missing email parameter",
        )),
        [identifier] => Ok(identifier.as_str()),
        _ => Err(FailureEnvelope::new(
            ErrorCode::TooManyParams,
            "Too many parameters",
        )),
    }
}

/// Run one enumeration scan and fold the outcome into an envelope.
pub async fn run_probe(args: &[String], orchestrator: &ProbeOrchestrator) -> ProbeEnvelope {
    let identifier = match select_identifier(args) {
        Ok(identifier) => identifier,
        Err(envelope) => {
            tracing::warn!(code = %envelope.code, "rejected probe arguments");
            return ProbeEnvelope::Failure(envelope);
        }
    };

    match orchestrator.scan(identifier).await {
        Ok(outcome) => {
            tracing::debug!(state = %outcome.state, "probe finished");
            ProbeEnvelope::Success(outcome.report)
        }
        Err(e) => ProbeEnvelope::Failure(FailureEnvelope::new(e.code(), e.to_string())),
    }
}

/// Envelope for failures outside the scan itself, such as a bad configuration file.
#[must_use]
pub fn internal_failure() -> ProbeEnvelope {
    ProbeEnvelope::Failure(FailureEnvelope::new(
        ErrorCode::InternalError,
        "Internal scan error",
    ))
}
