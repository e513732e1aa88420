//! Footprint Search - Multi-engine footprint aggregation.
//!
//! This crate searches for an identifier across a curated list of platform
//! domains on several search engines, then turns the noisy, overlapping hits
//! into a deduplicated, platform-classified result set.
//!
//! # Features
//!
//! - Deterministic query planning over (engine, domain chunk, page)
//! - Engine-specific pagination parameters
//! - Ordered platform registry with first-match classification
//! - First-seen deduplication by link, stable under parallel fetch
//! - Configurable continue-on-error / abort-on-error policy
//!
//! # Example
//!
//! ```rust,ignore
//! use footprint_search::{FootprintAggregator, PlatformRegistry, QueryPlanner, SerpApiClient};
//! use std::sync::Arc;
//!
//! let backend = Arc::new(SerpApiClient::new(api_key, &config.search)?);
//! let aggregator = FootprintAggregator::new(
//!     backend,
//!     Arc::new(PlatformRegistry::default()),
//!     QueryPlanner::from_config(&config.search)?,
//! );
//!
//! let report = aggregator.aggregate("alice@example.com").await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod aggregator;
pub mod backend;
pub mod dedup;
pub mod engine;
pub mod error;
pub mod planner;
pub mod registry;

// Re-export commonly used types
pub use aggregator::{FootprintAggregator, FootprintHit, FootprintReport, RawHit};
pub use backend::{OrganicResult, SearchBackend, SerpApiClient};
pub use dedup::dedup_by_link;
pub use engine::SearchEngine;
pub use error::{Result, SearchError};
pub use planner::{build_search_query, QueryPlanner, SearchRequest};
pub use registry::{PlatformRegistry, OTHER_PLATFORM};
