//! Footprint - command-line front ends for the footprint pipelines.
//!
//! Two binaries share this library:
//!
//! - `footprint-search` runs the multi-engine search aggregation and prints a
//!   [`SearchEnvelope`](footprint_core::SearchEnvelope).
//! - `footprint-probe` runs the account enumeration scan and prints a
//!   [`ProbeEnvelope`](footprint_core::ProbeEnvelope).
//!
//! Each invocation writes exactly one JSON document to stdout. Logs go to stderr.

pub mod cli;
pub mod commands;

use anyhow::Context;
use serde::Serialize;
use std::path::Path;

use footprint_core::{AppConfig, ProbeEnvelope, SearchEnvelope};

/// Exit status for a successful run, and for any printed search envelope.
pub const EXIT_OK: u8 = 0;

/// Exit status for a failed enumeration scan or missing search arguments.
pub const EXIT_FAILURE: u8 = 1;

/// Initialize tracing on stderr.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects between the quiet
/// default and debug output for the footprint crates.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_filter = if verbose {
        "info,footprint=debug"
    } else {
        "warn,footprint=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// Load configuration from `path` (or the default location) with environment overrides.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    AppConfig::load_with_env(path).context("failed to load configuration")
}

/// Serialize `value` as JSON, pretty-printed or compact.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Exit status after printing a search envelope.
///
/// Failures are reported inside the envelope; the process still exits 0 so
/// callers read the document instead of discarding it.
#[must_use]
pub fn search_exit_status<T>(_envelope: &SearchEnvelope<T>) -> u8 {
    EXIT_OK
}

/// Exit status after printing an enumeration envelope.
#[must_use]
pub fn probe_exit_status(envelope: &ProbeEnvelope) -> u8 {
    if envelope.is_success() {
        EXIT_OK
    } else {
        EXIT_FAILURE
    }
}
