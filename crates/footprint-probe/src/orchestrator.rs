//! Enumeration scan orchestration.
//!
//! A scan moves through `NotStarted → Running → {Succeeded, PartiallySucceeded, Failed}`.
//! The tool's exit status only decides the outcome when no platform line was
//! extracted; usable output from a failing run is still reported, with a warning.

use crate::error::{ExecError, ProbeError, Result};
use crate::executor::{ExecOutput, Executor};
use crate::parser::OutputParser;
use chrono::Utc;
use footprint_core::{Identifier, ProbeConfig, ProbeReport};
use futures::FutureExt;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

/// Longest stderr excerpt written to the log.
const STDERR_EXCERPT_CHARS: usize = 100;

/// Lifecycle of one enumeration scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Scan has not begun
    NotStarted,
    /// The enumeration tool is running
    Running,
    /// Tool exited 0
    Succeeded,
    /// Tool exited nonzero but platform lines were extracted
    PartiallySucceeded,
    /// Scan produced no report
    Failed,
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "NotStarted"),
            Self::Running => write!(f, "Running"),
            Self::Succeeded => write!(f, "Succeeded"),
            Self::PartiallySucceeded => write!(f, "PartiallySucceeded"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// A finished scan: its terminal state and the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    /// `Succeeded` or `PartiallySucceeded`
    pub state: ScanState,
    /// Report to emit
    pub report: ProbeReport,
}

/// Runs the enumeration tool for one identifier and structures its output.
pub struct ProbeOrchestrator {
    executor: Arc<dyn Executor>,
    parser: OutputParser,
    tool: String,
    timeout: Duration,
}

impl ProbeOrchestrator {
    /// Create an orchestrator around an executor.
    #[must_use]
    pub fn new(
        executor: Arc<dyn Executor>,
        parser: OutputParser,
        tool: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            executor,
            parser,
            tool: tool.into(),
            timeout,
        }
    }

    /// Create an orchestrator from the `[probe]` configuration section.
    #[must_use]
    pub fn from_config(executor: Arc<dyn Executor>, config: &ProbeConfig) -> Self {
        Self::new(
            executor,
            OutputParser::from_config(config),
            config.tool.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Validate `raw`, run the tool against it, and build a report.
    ///
    /// Validation happens before any process is spawned. A panic anywhere in
    /// the scan is logged and surfaced as [`ProbeError::Internal`].
    pub async fn scan(&self, raw: &str) -> Result<ProbeOutcome> {
        match AssertUnwindSafe(self.run(raw)).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => {
                let detail = payload
                    .downcast_ref::<&str>()
                    .map(ToString::to_string)
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".to_string());
                tracing::error!(panic = %detail, "enumeration scan panicked");
                Err(ProbeError::Internal)
            }
        }
    }

    async fn run(&self, raw: &str) -> Result<ProbeOutcome> {
        let mut state = ScanState::NotStarted;
        let identifier = Identifier::parse(raw)?;
        let masked = identifier.masked();

        advance(&mut state, ScanState::Running, &masked);
        tracing::info!(identifier = %masked, tool = %self.tool, "starting enumeration scan");

        let output = match self
            .executor
            .run(&self.tool, &[identifier.as_str().to_string()], self.timeout)
            .await
        {
            Ok(output) => output,
            Err(e) => {
                advance(&mut state, ScanState::Failed, &masked);
                return Err(self.map_exec_error(e));
            }
        };

        let parsed = self.parser.parse(&output.stdout);

        if !output.success() && parsed.is_empty() {
            advance(&mut state, ScanState::Failed, &masked);
            return Err(self.classify_failure(&output));
        }

        let count = parsed.count();
        let total_checked = parsed.total_checked();
        let (used_on, rate_limited) = parsed.into_parts();

        let (message, warning) = if output.success() {
            advance(&mut state, ScanState::Succeeded, &masked);
            (
                format!(
                    "Scan completed - {count} confirmed, {} rate-limited",
                    rate_limited.len()
                ),
                None,
            )
        } else {
            advance(&mut state, ScanState::PartiallySucceeded, &masked);
            let status = output
                .exit_code
                .map_or_else(|| "signal".to_string(), |code| code.to_string());
            tracing::warn!(
                identifier = %masked,
                status = %status,
                stderr = %stderr_excerpt(&output.stderr),
                "enumeration tool exited nonzero, keeping extracted data"
            );
            (
                "Partial scan completed with warnings".to_string(),
                Some(format!(
                    "Enumeration tool exited with status {status} but data was extracted"
                )),
            )
        };

        tracing::info!(
            identifier = %masked,
            confirmed = count,
            total_checked,
            "enumeration scan finished"
        );

        Ok(ProbeOutcome {
            state,
            report: ProbeReport {
                email: identifier.as_str().to_string(),
                used_on,
                rate_limited,
                count,
                total_checked,
                scan_time: epoch_seconds(),
                success: true,
                message,
                warning,
            },
        })
    }

    fn map_exec_error(&self, err: ExecError) -> ProbeError {
        match err {
            ExecError::TimedOut { after } => {
                tracing::warn!(tool = %self.tool, timeout_secs = after.as_secs(), "enumeration tool timed out");
                ProbeError::Timeout
            }
            ExecError::NotFound { program } => {
                tracing::error!(program = %program, "enumeration tool not found");
                ProbeError::ToolUnavailable {
                    tool: self.tool.clone(),
                }
            }
            ExecError::Io(e) => {
                tracing::error!(kind = ?e.kind(), "failed to run enumeration tool: {}", e);
                ProbeError::Internal
            }
        }
    }

    /// Map a failing run with no usable output to an error, using stderr hints.
    ///
    /// Stderr only reaches the log; the returned error carries a fixed message.
    fn classify_failure(&self, output: &ExecOutput) -> ProbeError {
        let lowered = output.stderr.to_lowercase();
        tracing::warn!(
            exit_code = ?output.exit_code,
            stderr = %stderr_excerpt(&output.stderr),
            "enumeration tool failed without producing results"
        );

        if lowered.contains("not found") {
            ProbeError::ToolUnavailable {
                tool: self.tool.clone(),
            }
        } else if lowered.contains("timeout") {
            ProbeError::Timeout
        } else {
            ProbeError::Runtime
        }
    }
}

fn advance(state: &mut ScanState, next: ScanState, identifier: &str) {
    tracing::debug!(identifier, from = %state, to = %next, "scan state transition");
    *state = next;
}

fn stderr_excerpt(stderr: &str) -> String {
    stderr.trim().chars().take(STDERR_EXCERPT_CHARS).collect()
}

#[allow(clippy::cast_precision_loss)]
fn epoch_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
