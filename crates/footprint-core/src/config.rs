//! Configuration management for footprint.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main application configuration.
///
/// This is loaded from `~/.config/footprint/config.toml` (or platform equivalent)
/// unless an explicit path is given. If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Multi-engine search settings
    pub search: SearchConfig,
    /// Account enumeration settings
    pub probe: ProbeConfig,
}

impl AppConfig {
    /// Load configuration from `path`, or from the default location when `None`.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file silently yields defaults.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let (config_path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path()?, false),
        };

        let config: Self = if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            toml::from_str(&contents)?
        } else if explicit {
            return Err(ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("config file not found at {}", config_path.display()),
            )));
        } else {
            tracing::debug!("Config file not found, using defaults");
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration and apply `FOOTPRINT_*` environment overrides.
    ///
    /// Supports the following environment variables:
    /// - `FOOTPRINT_SEARCH_CHUNK_SIZE`: domains per search query
    /// - `FOOTPRINT_SEARCH_MAX_PAGES`: pages fetched per engine/chunk
    /// - `FOOTPRINT_SEARCH_ON_ERROR`: `continue` or `abort`
    /// - `FOOTPRINT_PROBE_TOOL`: enumeration executable name or path
    /// - `FOOTPRINT_PROBE_TIMEOUT_SECS`: enumeration wall-clock bound
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = Self::load(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup. Unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(size) = parse_var(&lookup, "FOOTPRINT_SEARCH_CHUNK_SIZE") {
            self.search.chunk_size = size;
            tracing::debug!("Override search.chunk_size from env: {}", size);
        }

        if let Some(pages) = parse_var(&lookup, "FOOTPRINT_SEARCH_MAX_PAGES") {
            self.search.max_pages = pages;
            tracing::debug!("Override search.max_pages from env: {}", pages);
        }

        if let Some(policy) = parse_var::<ErrorPolicy, _>(&lookup, "FOOTPRINT_SEARCH_ON_ERROR") {
            self.search.on_error = policy;
            tracing::debug!("Override search.on_error from env: {:?}", policy);
        }

        if let Some(tool) = lookup("FOOTPRINT_PROBE_TOOL").filter(|t| !t.trim().is_empty()) {
            tracing::debug!("Override probe.tool from env: {}", tool);
            self.probe.tool = tool;
        }

        if let Some(secs) = parse_var(&lookup, "FOOTPRINT_PROBE_TIMEOUT_SECS") {
            self.probe.timeout_secs = secs;
            tracing::debug!("Override probe.timeout_secs from env: {}", secs);
        }
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        let checks: [(&str, bool, &str); 8] = [
            ("search.engines", !self.search.engines.is_empty(), "at least one engine is required"),
            ("search.chunk_size", self.search.chunk_size >= 1, "must be at least 1"),
            (
                "search.results_per_page",
                (1..=MAX_RESULTS_PER_PAGE).contains(&self.search.results_per_page),
                "must be between 1 and 100",
            ),
            (
                "search.max_pages",
                (1..=MAX_PAGES).contains(&self.search.max_pages),
                "must be between 1 and 100",
            ),
            ("search.concurrency", self.search.concurrency >= 1, "must be at least 1"),
            ("probe.timeout_secs", self.probe.timeout_secs >= 1, "must be at least 1"),
            ("probe.confirmed_marker", !self.probe.confirmed_marker.trim().is_empty(), "must not be empty"),
            ("probe.rate_limited_marker", !self.probe.rate_limited_marker.trim().is_empty(), "must not be empty"),
        ];

        match checks.iter().find(|(_, ok, _)| !ok) {
            Some((field, _, reason)) => Err(ConfigError::InvalidValue {
                field: (*field).to_string(),
                reason: (*reason).to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/footprint/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "footprint", "footprint").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|val| val.trim().parse().ok())
}

/// What the search aggregator does when a single query fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log the failure, count it, and move on to the next query
    #[default]
    Continue,
    /// Stop at the first failure and discard everything collected so far
    Abort,
}

impl FromStr for ErrorPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "continue" => Ok(Self::Continue),
            "abort" => Ok(Self::Abort),
            other => Err(ConfigError::InvalidValue {
                field: "search.on_error".to_string(),
                reason: format!("expected 'continue' or 'abort', got '{other}'"),
            }),
        }
    }
}

/// Largest page size the search API accepts.
pub const MAX_RESULTS_PER_PAGE: u32 = 100;

/// Upper bound on pages fetched per engine/chunk pair.
pub const MAX_PAGES: u32 = 100;

/// Multi-engine search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Engines to query, in iteration order
    pub engines: Vec<String>,
    /// Maximum number of domains OR-ed together in one query
    pub chunk_size: usize,
    /// Results requested per page
    pub results_per_page: u32,
    /// Pages fetched per engine/chunk pair
    pub max_pages: u32,
    /// Per-query failure handling
    pub on_error: ErrorPolicy,
    /// Queries in flight at once (1 = strictly sequential)
    pub concurrency: usize,
    /// Search API endpoint
    pub base_url: String,
    /// Interface language (`hl`)
    pub language: String,
    /// Result country (`gl`)
    pub country: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engines: ["google", "bing", "duckduckgo", "yahoo"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            chunk_size: 8,
            results_per_page: 10,
            max_pages: 2,
            on_error: ErrorPolicy::Continue,
            concurrency: 1,
            base_url: "https://serpapi.com/search.json".to_string(),
            language: "en".to_string(),
            country: "us".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Account enumeration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Enumeration executable, resolved on `PATH` unless absolute
    pub tool: String,
    /// Wall-clock bound for one enumeration run
    pub timeout_secs: u64,
    /// Line prefix marking a confirmed registration
    pub confirmed_marker: String,
    /// Line prefix marking a throttled check
    pub rate_limited_marker: String,
    /// Case-insensitive substrings that mark footer/progress/summary lines
    pub noise_phrases: Vec<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            tool: "holehe".to_string(),
            timeout_secs: 120,
            confirmed_marker: "[+]".to_string(),
            rate_limited_marker: "[x]".to_string(),
            noise_phrases: [
                "email used",
                "email not used",
                "rate limit",
                "websites checked",
                "twitter :",
                "github :",
                "for btc",
                "***",
                "100%",
                "it/s",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.search.engines.len(), 4);
        assert_eq!(config.search.chunk_size, 8);
        assert_eq!(config.search.results_per_page, 10);
        assert_eq!(config.search.max_pages, 2);
        assert_eq!(config.search.on_error, ErrorPolicy::Continue);
        assert_eq!(config.probe.timeout_secs, 120);
        assert_eq!(config.probe.tool, "holehe");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(
            file,
            "[search]\nchunk_size = 4\non_error = \"abort\"\n\n[probe]\ntool = \"/opt/holehe\""
        )
        .expect("write config");

        let config = AppConfig::load(Some(file.path())).expect("load config");
        assert_eq!(config.search.chunk_size, 4);
        assert_eq!(config.search.on_error, ErrorPolicy::Abort);
        assert_eq!(config.search.max_pages, 2);
        assert_eq!(config.probe.tool, "/opt/holehe");
        assert_eq!(config.probe.confirmed_marker, "[+]");
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let result = AppConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(file, "[search]\nchunk_size = 0").expect("write config");

        let err = AppConfig::load(Some(file.path())).expect_err("zero chunk size");
        assert!(err.to_string().contains("search.chunk_size"));
    }

    #[test]
    fn test_page_bounds_rejected() {
        let mut config = AppConfig::default();
        config.search.results_per_page = u32::MAX;
        let err = config.validate().expect_err("oversized page");
        assert!(err.to_string().contains("search.results_per_page"));

        let mut config = AppConfig::default();
        config.search.max_pages = MAX_PAGES + 1;
        let err = config.validate().expect_err("too many pages");
        assert!(err.to_string().contains("search.max_pages"));

        let mut config = AppConfig::default();
        config.search.results_per_page = MAX_RESULTS_PER_PAGE;
        config.search.max_pages = MAX_PAGES;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(file, "[search\nchunk_size = ").expect("write config");

        let result = AppConfig::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("FOOTPRINT_SEARCH_CHUNK_SIZE", "5"),
            ("FOOTPRINT_SEARCH_MAX_PAGES", "not-a-number"),
            ("FOOTPRINT_SEARCH_ON_ERROR", "ABORT"),
            ("FOOTPRINT_PROBE_TOOL", "holehe-dev"),
            ("FOOTPRINT_PROBE_TIMEOUT_SECS", "30"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|key| vars.get(key).map(ToString::to_string));

        assert_eq!(config.search.chunk_size, 5);
        assert_eq!(config.search.max_pages, 2);
        assert_eq!(config.search.on_error, ErrorPolicy::Abort);
        assert_eq!(config.probe.tool, "holehe-dev");
        assert_eq!(config.probe.timeout_secs, 30);
    }

    #[test]
    fn test_error_policy_from_str() {
        assert_eq!("continue".parse::<ErrorPolicy>().ok(), Some(ErrorPolicy::Continue));
        assert!("retry".parse::<ErrorPolicy>().is_err());
    }
}
