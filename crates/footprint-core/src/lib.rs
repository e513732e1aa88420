//! Footprint Core - Foundation crate for the footprint correlation tools.
//!
//! This crate provides the pieces both pipelines share: the error taxonomy and
//! its CLI error-code table, TOML configuration, the identifier guard that runs
//! before anything reaches an external process, and the JSON result envelopes.
//!
//! # Modules
//!
//! - [`error`] - Central error types and the closed [`ErrorCode`] table
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - The validated [`Identifier`] newtype and log masking
//! - [`envelope`] - Serializable success/failure documents for both pipelines
//!
//! # Example
//!
//! ```rust
//! use footprint_core::{AppConfig, Identifier};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.search.chunk_size, 8);
//!
//! let id = Identifier::parse("  Alice@Example.com ")?;
//! assert_eq!(id.as_str(), "alice@example.com");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod envelope;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, ErrorPolicy, ProbeConfig, SearchConfig, MAX_PAGES, MAX_RESULTS_PER_PAGE,
};
pub use envelope::{FailureEnvelope, ProbeEnvelope, ProbeReport, SearchEnvelope};
pub use error::{ConfigError, ConfigResult, CoreError, ErrorCode, Result};
pub use types::{mask_identifier, Identifier};
