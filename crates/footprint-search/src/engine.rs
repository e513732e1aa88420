//! Supported search engines and their pagination conventions.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A search engine reachable through the search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    /// Google web search
    Google,
    /// Bing web search
    Bing,
    /// `DuckDuckGo` web search
    DuckDuckGo,
    /// Yahoo web search
    Yahoo,
}

impl SearchEngine {
    /// All engines, in default iteration order.
    pub const ALL: [Self; 4] = [Self::Google, Self::Bing, Self::DuckDuckGo, Self::Yahoo];

    /// The engine name the search API expects.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Bing => "bing",
            Self::DuckDuckGo => "duckduckgo",
            Self::Yahoo => "yahoo",
        }
    }

    /// Name of the query parameter carrying the result offset.
    #[must_use]
    pub fn offset_param(self) -> &'static str {
        match self {
            Self::Google | Self::DuckDuckGo => "start",
            Self::Bing => "first",
            Self::Yahoo => "b",
        }
    }

    /// Offset value for a zero-based `page` of `per_page` results.
    ///
    /// Bing and Yahoo count result ordinals from 1; sending a 0-based offset
    /// to them makes page two repeat page one. Saturates at `u32::MAX`.
    #[must_use]
    pub fn offset(self, page: u32, per_page: u32) -> u32 {
        let base = page.saturating_mul(per_page);
        match self {
            Self::Google | Self::DuckDuckGo => base,
            Self::Bing | Self::Yahoo => base.saturating_add(1),
        }
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchEngine {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|engine| engine.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SearchError::UnknownEngine(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        assert_eq!(SearchEngine::Google.offset(0, 10), 0);
        assert_eq!(SearchEngine::Google.offset(1, 10), 10);
        assert_eq!(SearchEngine::DuckDuckGo.offset(1, 10), 10);
        assert_eq!(SearchEngine::Bing.offset(0, 10), 1);
        assert_eq!(SearchEngine::Bing.offset(1, 10), 11);
        assert_eq!(SearchEngine::Yahoo.offset(1, 10), 11);
    }

    #[test]
    fn test_offset_never_overflows() {
        assert_eq!(SearchEngine::Bing.offset(1, u32::MAX), u32::MAX);
        assert_eq!(SearchEngine::Yahoo.offset(u32::MAX, 2), u32::MAX);
        assert_eq!(SearchEngine::Google.offset(99, 100), 9_900);
        assert_eq!(SearchEngine::Bing.offset(99, 100), 9_901);
    }

    #[test]
    fn test_offset_params() {
        assert_eq!(SearchEngine::Google.offset_param(), "start");
        assert_eq!(SearchEngine::Bing.offset_param(), "first");
        assert_eq!(SearchEngine::DuckDuckGo.offset_param(), "start");
        assert_eq!(SearchEngine::Yahoo.offset_param(), "b");
    }

    #[test]
    fn test_parse_engine() {
        assert_eq!("Bing".parse::<SearchEngine>().ok(), Some(SearchEngine::Bing));
        assert_eq!(
            " duckduckgo ".parse::<SearchEngine>().ok(),
            Some(SearchEngine::DuckDuckGo)
        );
        assert!(matches!(
            "altavista".parse::<SearchEngine>(),
            Err(SearchError::UnknownEngine(_))
        ));
    }

    #[test]
    fn test_serde_name_matches_api_name() {
        for engine in SearchEngine::ALL {
            let json = serde_json::to_string(&engine).expect("serialize engine");
            assert_eq!(json, format!("\"{}\"", engine.as_str()));
        }
    }
}
