//! Footprint Probe - Account-existence enumeration via an external tool.
//!
//! This crate runs a line-oriented enumeration executable against a validated
//! identifier and turns its free-text report into confirmed and rate-limited
//! platform lists. It never verifies the tool's findings; it only structures
//! and classifies them.
//!
//! # Example
//!
//! ```rust,ignore
//! use footprint_probe::{ProbeOrchestrator, ProcessExecutor};
//! use std::sync::Arc;
//!
//! let orchestrator = ProbeOrchestrator::from_config(Arc::new(ProcessExecutor), &config.probe);
//! let outcome = orchestrator.scan("alice@example.com").await?;
//! println!("{} confirmed", outcome.report.count);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod executor;
pub mod orchestrator;
pub mod parser;

// Re-export commonly used types
pub use error::{ExecError, ProbeError, Result};
pub use executor::{ExecOutput, Executor, ProcessExecutor};
pub use orchestrator::{ProbeOrchestrator, ProbeOutcome, ScanState};
pub use parser::{EnumerationLine, EnumerationResult, OutputParser};
