//! Search backends: the opaque query/response service behind the aggregator.

use crate::error::{Result, SearchError};
use crate::planner::SearchRequest;
use async_trait::async_trait;
use footprint_core::SearchConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Capability to run one planned query and return its organic results.
///
/// Implementations must be thread-safe so the aggregator can keep several
/// queries in flight.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run a single query.
    ///
    /// # Errors
    /// Returns error on transport failures, API errors, or unparseable bodies.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<OrganicResult>>;
}

/// One organic result as returned by the search API. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganicResult {
    /// Result title
    #[serde(default)]
    pub title: Option<String>,
    /// Result URL
    #[serde(default)]
    pub link: Option<String>,
    /// Text excerpt
    #[serde(default)]
    pub snippet: Option<String>,
    /// Source as shown on the results page
    #[serde(default)]
    pub displayed_link: Option<String>,
    /// Rank on the page
    #[serde(default)]
    pub position: Option<u32>,
}

/// Phrase the API uses when a query simply matched nothing.
const NO_RESULTS_MARKER: &str = "hasn't returned any results";

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    #[serde(default)]
    error: Option<String>,
}

/// Search backend talking to the SerpApi JSON endpoint.
pub struct SerpApiClient {
    api_key: String,
    client: Client,
    base_url: String,
    language: String,
    country: String,
    timeout_secs: u64,
}

impl SerpApiClient {
    /// Create a client from the `[search]` configuration section.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>, config: &SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            api_key: api_key.into(),
            client,
            base_url: config.base_url.clone(),
            language: config.language.clone(),
            country: config.country.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Query parameters for `request`, api key included.
    fn query_params(&self, request: &SearchRequest) -> Vec<(&'static str, String)> {
        let (offset_param, offset) = request.pagination();
        vec![
            ("engine", request.engine.as_str().to_string()),
            ("q", request.query.clone()),
            ("api_key", self.api_key.clone()),
            ("num", request.num.to_string()),
            ("hl", self.language.clone()),
            ("gl", self.country.clone()),
            (offset_param, offset.to_string()),
        ]
    }
}

#[async_trait]
impl SearchBackend for SerpApiClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<OrganicResult>> {
        let engine = request.engine;

        let response = self
            .client
            .get(&self.base_url)
            .query(&self.query_params(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout {
                        engine,
                        seconds: self.timeout_secs,
                    }
                } else {
                    SearchError::Network(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await?;

        // The API reports failures as {"error": "..."}, often with a 4xx status.
        let parsed: std::result::Result<SerpApiResponse, _> = serde_json::from_str(&body);

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(SearchError::Api {
                engine,
                status: status.as_u16(),
                message,
            });
        }

        let parsed = parsed.map_err(|e| SearchError::Parse {
            engine,
            message: format!("Failed to parse response: {e}"),
        })?;

        if let Some(message) = parsed.error {
            if message.contains(NO_RESULTS_MARKER) {
                tracing::debug!(engine = %engine, "search query returned no results");
                return Ok(Vec::new());
            }
            return Err(SearchError::Api {
                engine,
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(
            engine = %engine,
            chunk = request.chunk_index,
            page = request.page,
            results = parsed.organic_results.len(),
            "search query completed"
        );

        Ok(parsed.organic_results)
    }
}
