//! Footprint aggregation across engines, domain chunks and pages.
//!
//! This module provides the `FootprintAggregator`, which fans the planned
//! queries out to a [`SearchBackend`], collects hits in plan order, and
//! reduces them to a deduplicated, classified result set.

use crate::backend::{OrganicResult, SearchBackend};
use crate::dedup::dedup_by_link;
use crate::engine::SearchEngine;
use crate::error::Result;
use crate::planner::QueryPlanner;
use crate::registry::PlatformRegistry;
use footprint_core::{mask_identifier, ErrorPolicy};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single search hit before deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHit {
    /// Result title
    pub title: String,
    /// Result URL, possibly empty
    pub link: String,
    /// Text excerpt
    pub snippet: String,
    /// Displayed source string
    pub source: String,
    /// Rank on the results page
    pub position: Option<u32>,
    /// Engine the hit came from
    pub engine: SearchEngine,
}

impl RawHit {
    /// Normalize an API result, filling absent strings with `""`.
    #[must_use]
    pub fn from_organic(result: OrganicResult, engine: SearchEngine) -> Self {
        Self {
            title: result.title.unwrap_or_default(),
            link: result.link.unwrap_or_default(),
            snippet: result.snippet.unwrap_or_default(),
            source: result.displayed_link.unwrap_or_default(),
            position: result.position,
            engine,
        }
    }
}

/// A deduplicated hit with its resolved platform label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootprintHit {
    /// Result title
    pub title: String,
    /// Result URL, never empty
    pub link: String,
    /// Platform resolved from the registry
    pub platform: String,
    /// Text excerpt
    pub snippet: String,
    /// Displayed source string
    pub source: String,
    /// Rank on the results page
    pub position: Option<u32>,
    /// Engine the hit came from
    pub engine: SearchEngine,
}

/// Outcome of one aggregation run.
#[derive(Debug, Clone, Default)]
pub struct FootprintReport {
    /// Unique hits in first-seen order
    pub hits: Vec<FootprintHit>,
    /// Queries issued
    pub queries_issued: usize,
    /// Queries that failed and were skipped
    pub failed_queries: usize,
}

/// Fans queries out to a search backend and reduces the evidence.
pub struct FootprintAggregator {
    /// Backend answering individual queries
    backend: Arc<dyn SearchBackend>,
    /// Domain list and classifier
    registry: Arc<PlatformRegistry>,
    /// Query enumeration settings
    planner: QueryPlanner,
    /// Per-query failure handling
    on_error: ErrorPolicy,
    /// Queries kept in flight at once
    concurrency: usize,
}

impl FootprintAggregator {
    /// Create a new sequential, continue-on-error aggregator.
    #[must_use]
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        registry: Arc<PlatformRegistry>,
        planner: QueryPlanner,
    ) -> Self {
        Self {
            backend,
            registry,
            planner,
            on_error: ErrorPolicy::Continue,
            concurrency: 1,
        }
    }

    /// Set the per-query failure policy.
    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }

    /// Set the number of queries kept in flight. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Search every (engine, chunk, page) for `identifier`.
    ///
    /// Responses are consumed in plan order even when several queries are in
    /// flight, so "first occurrence wins" is independent of network timing.
    ///
    /// # Errors
    /// Only under [`ErrorPolicy::Abort`]: the first failed query's error.
    pub async fn aggregate(&self, identifier: &str) -> Result<FootprintReport> {
        let domains = self.registry.domains();
        let requests = self.planner.plan(identifier, &domains);

        tracing::info!(
            identifier = %mask_identifier(identifier),
            queries = requests.len(),
            concurrency = self.concurrency,
            "starting footprint search"
        );

        let backend = self.backend.as_ref();
        let mut responses = stream::iter(&requests)
            .map(move |request| async move { (request, backend.search(request).await) })
            .buffered(self.concurrency);

        let mut raw = Vec::new();
        let mut failed_queries = 0;

        while let Some((request, outcome)) = responses.next().await {
            match outcome {
                Ok(results) => raw.extend(
                    results
                        .into_iter()
                        .map(|result| RawHit::from_organic(result, request.engine)),
                ),
                Err(e) => match self.on_error {
                    ErrorPolicy::Abort => {
                        tracing::error!(
                            engine = %request.engine,
                            chunk = request.chunk_index,
                            page = request.page,
                            "search query failed, aborting: {}",
                            e
                        );
                        return Err(e);
                    }
                    ErrorPolicy::Continue => {
                        failed_queries += 1;
                        tracing::warn!(
                            engine = %request.engine,
                            chunk = request.chunk_index,
                            page = request.page,
                            "search query failed, continuing: {}",
                            e
                        );
                    }
                },
            }
        }

        let collected = raw.len();
        let hits: Vec<FootprintHit> = dedup_by_link(raw, |hit: &RawHit| hit.link.as_str())
            .into_iter()
            .map(|hit| self.classify(hit))
            .collect();

        tracing::info!(
            collected,
            unique = hits.len(),
            failed_queries,
            "footprint search finished"
        );

        Ok(FootprintReport {
            hits,
            queries_issued: requests.len(),
            failed_queries,
        })
    }

    fn classify(&self, hit: RawHit) -> FootprintHit {
        let platform = self.registry.classify(&hit.link).to_string();
        FootprintHit {
            title: hit.title,
            link: hit.link,
            platform,
            snippet: hit.snippet,
            source: hit.source,
            position: hit.position,
            engine: hit.engine,
        }
    }
}
