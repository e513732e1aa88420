//! Command-line definitions for both binaries.

use clap::error::ErrorKind;
use clap::Parser;
use footprint_core::{ErrorCode, FailureEnvelope, ProbeEnvelope};
use std::path::PathBuf;

/// `footprint-search <identifier> <api_key>`
#[derive(Debug, Parser)]
#[command(
    name = "footprint-search",
    about = "Search an identifier across platform domains on several search engines",
    version
)]
pub struct SearchCli {
    /// Email address or username to search for.
    #[arg(allow_hyphen_values = true)]
    pub identifier: Option<String>,

    /// Search API key.
    #[arg(allow_hyphen_values = true)]
    pub api_key: Option<String>,

    /// Path to a configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// `footprint-probe <email>`
#[derive(Debug, Parser)]
#[command(
    name = "footprint-probe",
    about = "Check which services an email address is registered on",
    version
)]
pub struct ProbeCli {
    /// Email address to check. Exactly one is expected.
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Path to a configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Whether a parse error is really a help or version request.
#[must_use]
pub fn is_informational(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

/// Envelope for arguments clap rejected, or `None` for help and version output.
///
/// clap's own text goes to stderr; stdout still gets exactly one document.
#[must_use]
pub fn probe_argument_failure(err: &clap::Error) -> Option<ProbeEnvelope> {
    if is_informational(err) {
        return None;
    }
    tracing::warn!(kind = ?err.kind(), "rejected command-line arguments");
    Some(ProbeEnvelope::Failure(FailureEnvelope::new(
        ErrorCode::ValidationError,
        "Invalid input: unrecognized command-line arguments",
    )))
}
