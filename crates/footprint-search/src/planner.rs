//! Query planning over (engine, domain chunk, page).
//!
//! The planner is pure: the same identifier, domain list and settings always
//! yield the same requests in the same order. Engines are the outer loop,
//! then chunks, then pages.

use crate::engine::SearchEngine;
use crate::error::{Result, SearchError};
use footprint_core::{SearchConfig, MAX_PAGES, MAX_RESULTS_PER_PAGE};

/// One query to issue against the search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Target engine
    pub engine: SearchEngine,
    /// Index of the domain chunk this query covers
    pub chunk_index: usize,
    /// Zero-based page number
    pub page: u32,
    /// Full query text
    pub query: String,
    /// Results requested for this page
    pub num: u32,
}

impl SearchRequest {
    /// Engine-specific pagination parameter for this request.
    #[must_use]
    pub fn pagination(&self) -> (&'static str, u32) {
        (
            self.engine.offset_param(),
            self.engine.offset(self.page, self.num),
        )
    }
}

/// Builds the `"identifier" (site:a OR site:b ...)` query text.
///
/// Double quotes are stripped from the identifier so the exact-match token
/// stays balanced.
#[must_use]
pub fn build_search_query<S: AsRef<str>>(identifier: &str, sites: &[S]) -> String {
    let token: String = identifier.chars().filter(|c| *c != '"').collect();
    let sites_query = sites
        .iter()
        .map(|domain| format!("site:{}", domain.as_ref()))
        .collect::<Vec<_>>()
        .join(" OR ");

    format!("\"{token}\" ({sites_query})")
}

/// Deterministic enumerator of every query a search run issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlanner {
    engines: Vec<SearchEngine>,
    chunk_size: usize,
    results_per_page: u32,
    max_pages: u32,
}

impl QueryPlanner {
    /// Create a planner.
    ///
    /// # Errors
    /// Returns `SearchError::InvalidSettings` if any size is zero or no engine is given.
    pub fn new(
        engines: Vec<SearchEngine>,
        chunk_size: usize,
        results_per_page: u32,
        max_pages: u32,
    ) -> Result<Self> {
        if engines.is_empty() {
            return Err(SearchError::InvalidSettings(
                "at least one engine is required".to_string(),
            ));
        }
        if chunk_size == 0 || results_per_page == 0 || max_pages == 0 {
            return Err(SearchError::InvalidSettings(
                "chunk size, results per page and max pages must be positive".to_string(),
            ));
        }
        if results_per_page > MAX_RESULTS_PER_PAGE || max_pages > MAX_PAGES {
            return Err(SearchError::InvalidSettings(format!(
                "results per page and max pages must not exceed {MAX_RESULTS_PER_PAGE} and {MAX_PAGES}"
            )));
        }

        Ok(Self {
            engines,
            chunk_size,
            results_per_page,
            max_pages,
        })
    }

    /// Create a planner from the `[search]` configuration section.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let engines = config
            .engines
            .iter()
            .map(|name| name.parse())
            .collect::<Result<Vec<SearchEngine>>>()?;

        Self::new(
            engines,
            config.chunk_size,
            config.results_per_page,
            config.max_pages,
        )
    }

    /// Engines in iteration order.
    #[must_use]
    pub fn engines(&self) -> &[SearchEngine] {
        &self.engines
    }

    /// Consecutive chunks of at most `chunk_size` domains, order preserved.
    #[must_use]
    pub fn chunks<'a, S>(&self, domains: &'a [S]) -> Vec<&'a [S]> {
        domains.chunks(self.chunk_size).collect()
    }

    /// Number of requests [`plan`](Self::plan) yields for `domain_count` domains.
    #[must_use]
    pub fn query_count(&self, domain_count: usize) -> usize {
        self.engines.len() * domain_count.div_ceil(self.chunk_size) * self.max_pages as usize
    }

    /// Every request for `identifier` over `domains`, engine-major.
    #[must_use]
    pub fn plan<S: AsRef<str>>(&self, identifier: &str, domains: &[S]) -> Vec<SearchRequest> {
        let chunks = self.chunks(domains);
        let mut requests = Vec::with_capacity(self.query_count(domains.len()));

        for &engine in &self.engines {
            for (chunk_index, chunk) in chunks.iter().enumerate() {
                let query = build_search_query(identifier, chunk);
                for page in 0..self.max_pages {
                    requests.push(SearchRequest {
                        engine,
                        chunk_index,
                        page,
                        query: query.clone(),
                        num: self.results_per_page,
                    });
                }
            }
        }

        requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domains(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("site{i}.example")).collect()
    }

    fn default_planner() -> QueryPlanner {
        QueryPlanner::from_config(&SearchConfig::default()).expect("default config is valid")
    }

    #[test]
    fn test_chunking_preserves_order_and_remainder() {
        let planner = default_planner();
        let domains = domains(130);
        let chunks = planner.chunks(&domains);

        assert_eq!(chunks.len(), 17);
        assert!(chunks[..16].iter().all(|c| c.len() == 8));
        assert_eq!(chunks[16].len(), 2);
        assert_eq!(chunks[16][1], "site129.example");

        let flattened: Vec<&String> = chunks.iter().flat_map(|c| c.iter()).collect();
        assert_eq!(flattened, domains.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_total_query_count() {
        let planner = default_planner();
        let domains = domains(130);
        assert_eq!(planner.query_count(130), 136);
        assert_eq!(planner.plan("a@b.co", &domains).len(), 136);
    }

    #[test]
    fn test_plan_order_is_engine_chunk_page() {
        let planner = QueryPlanner::new(vec![SearchEngine::Google, SearchEngine::Bing], 2, 10, 2)
            .expect("valid planner");
        let plan = planner.plan("a@b.co", &domains(3));

        let order: Vec<(SearchEngine, usize, u32)> = plan
            .iter()
            .map(|r| (r.engine, r.chunk_index, r.page))
            .collect();
        assert_eq!(
            order,
            vec![
                (SearchEngine::Google, 0, 0),
                (SearchEngine::Google, 0, 1),
                (SearchEngine::Google, 1, 0),
                (SearchEngine::Google, 1, 1),
                (SearchEngine::Bing, 0, 0),
                (SearchEngine::Bing, 0, 1),
                (SearchEngine::Bing, 1, 0),
                (SearchEngine::Bing, 1, 1),
            ]
        );
    }

    #[test]
    fn test_pagination_per_engine() {
        let planner = QueryPlanner::new(SearchEngine::ALL.to_vec(), 8, 10, 2).expect("valid planner");
        let plan = planner.plan("a@b.co", &domains(1));

        let pages: Vec<(&str, u32)> = plan.iter().map(SearchRequest::pagination).collect();
        assert_eq!(
            pages,
            vec![
                ("start", 0),
                ("start", 10),
                ("first", 1),
                ("first", 11),
                ("start", 0),
                ("start", 10),
                ("b", 1),
                ("b", 11),
            ]
        );
    }

    #[test]
    fn test_query_text() {
        let query = build_search_query("a@b.co", &["github.com", "gitlab.com"]);
        assert_eq!(query, "\"a@b.co\" (site:github.com OR site:gitlab.com)");

        let quoted = build_search_query("a\"@b.co", &["github.com"]);
        assert_eq!(quoted, "\"a@b.co\" (site:github.com)");
    }

    #[test]
    fn test_empty_domains_plan_nothing() {
        let planner = default_planner();
        let none: Vec<String> = Vec::new();
        assert!(planner.plan("a@b.co", &none).is_empty());
        assert_eq!(planner.query_count(0), 0);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(QueryPlanner::new(vec![], 8, 10, 2).is_err());
        assert!(QueryPlanner::new(vec![SearchEngine::Google], 0, 10, 2).is_err());
        assert!(matches!(
            QueryPlanner::new(vec![SearchEngine::Bing], 8, u32::MAX, 2),
            Err(SearchError::InvalidSettings(_))
        ));
        assert!(matches!(
            QueryPlanner::new(vec![SearchEngine::Yahoo], 8, 10, u32::MAX),
            Err(SearchError::InvalidSettings(_))
        ));

        let config = SearchConfig {
            engines: vec!["google".to_string(), "altavista".to_string()],
            ..SearchConfig::default()
        };
        assert!(matches!(
            QueryPlanner::from_config(&config),
            Err(SearchError::UnknownEngine(_))
        ));
    }
}
