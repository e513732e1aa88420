//! Multi-engine search command.

use footprint_core::{mask_identifier, SearchConfig, SearchEnvelope};
use footprint_search::{
    FootprintAggregator, FootprintHit, PlatformRegistry, QueryPlanner, SearchBackend,
    SerpApiClient,
};
use std::sync::Arc;

/// Envelope printed by `footprint-search`.
pub type SearchOutput = SearchEnvelope<FootprintHit>;

/// Aggregate hits for `identifier` using an arbitrary backend.
///
/// The identifier may be a username or an email, so it is only trimmed and
/// checked for emptiness. Under the abort policy any query failure yields a
/// failure envelope with no results.
pub async fn run_search(
    identifier: &str,
    backend: Arc<dyn SearchBackend>,
    registry: Arc<PlatformRegistry>,
    config: &SearchConfig,
) -> SearchOutput {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return SearchEnvelope::failure(identifier, "Identifier must be a non-empty string");
    }

    let planner = match QueryPlanner::from_config(config) {
        Ok(planner) => planner,
        Err(e) => {
            tracing::error!("invalid search settings: {}", e);
            return SearchEnvelope::failure(identifier, e.to_string());
        }
    };

    let aggregator = FootprintAggregator::new(backend, registry, planner)
        .with_error_policy(config.on_error)
        .with_concurrency(config.concurrency);

    match aggregator.aggregate(identifier).await {
        Ok(report) => SearchEnvelope::success(identifier, report.hits, report.failed_queries),
        Err(e) => {
            tracing::error!(
                identifier = %mask_identifier(identifier),
                "footprint search aborted: {}",
                e
            );
            SearchEnvelope::failure(identifier, e.to_string())
        }
    }
}

/// Aggregate hits for `identifier` through the hosted search API.
pub async fn search_with_api_key(
    identifier: &str,
    api_key: &str,
    config: &SearchConfig,
) -> SearchOutput {
    let client = match SerpApiClient::new(api_key, config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("failed to build search client: {}", e);
            return SearchEnvelope::failure(identifier.trim(), e.to_string());
        }
    };

    run_search(
        identifier,
        Arc::new(client),
        Arc::new(PlatformRegistry::default()),
        config,
    )
    .await
}
