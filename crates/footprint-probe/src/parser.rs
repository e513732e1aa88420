//! Parsing of the enumeration tool's text report.
//!
//! The tool prints one line per checked service, prefixed with a bracketed
//! marker (`[+] Platform` for a confirmed registration, `[x] Platform` when
//! the check was throttled), mixed with banners, progress bars and a summary
//! footer. Only marker lines are kept; everything else is noise.

use footprint_core::ProbeConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// ANSI SGR sequences some tool versions emit even when piped.
static ANSI_ESCAPE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("valid ANSI escape regex"));

/// Classification of a single report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumerationLine {
    /// The identifier is registered on this platform
    Confirmed(String),
    /// The check was throttled; inconclusive
    RateLimited(String),
    /// Banner, progress, summary, or anything unrecognised
    Noise,
}

/// Confirmed and rate-limited platforms extracted from one scan.
///
/// Each list holds unique names in the order first reported, with the case
/// the tool used. Built only by [`OutputParser::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumerationResult {
    used_on: Vec<String>,
    rate_limited: Vec<String>,
}

impl EnumerationResult {
    /// Platforms where the identifier is confirmed.
    #[must_use]
    pub fn used_on(&self) -> &[String] {
        &self.used_on
    }

    /// Platforms whose check was throttled.
    #[must_use]
    pub fn rate_limited(&self) -> &[String] {
        &self.rate_limited
    }

    /// Number of confirmed platforms.
    #[must_use]
    pub fn count(&self) -> usize {
        self.used_on.len()
    }

    /// Confirmed plus rate-limited platforms.
    #[must_use]
    pub fn total_checked(&self) -> usize {
        self.used_on.len() + self.rate_limited.len()
    }

    /// Whether no line was classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_checked() == 0
    }

    /// Split into `(used_on, rate_limited)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.used_on, self.rate_limited)
    }
}

/// Line classifier with configurable markers and noise denylist.
#[derive(Debug, Clone)]
pub struct OutputParser {
    confirmed_marker: String,
    rate_limited_marker: String,
    /// Lower-cased noise phrases
    noise_phrases: Vec<String>,
}

impl OutputParser {
    /// Create a parser. Noise phrases match case-insensitively.
    pub fn new<I, S>(
        confirmed_marker: impl Into<String>,
        rate_limited_marker: impl Into<String>,
        noise_phrases: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            confirmed_marker: confirmed_marker.into(),
            rate_limited_marker: rate_limited_marker.into(),
            noise_phrases: noise_phrases
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Create a parser from the `[probe]` configuration section.
    #[must_use]
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(
            config.confirmed_marker.clone(),
            config.rate_limited_marker.clone(),
            &config.noise_phrases,
        )
    }

    /// Classify one line of output.
    ///
    /// Blank lines and lines containing a noise phrase are [`EnumerationLine::Noise`].
    /// The confirmed marker is checked first, so a line is never counted twice.
    #[must_use]
    pub fn classify_line(&self, line: &str) -> EnumerationLine {
        let cleaned = strip_ansi(line);
        let line = cleaned.trim();

        if line.is_empty() || self.is_noise(line) {
            return EnumerationLine::Noise;
        }

        if let Some(platform) = marker_payload(line, &self.confirmed_marker) {
            return EnumerationLine::Confirmed(platform.to_string());
        }

        if let Some(platform) = marker_payload(line, &self.rate_limited_marker) {
            return EnumerationLine::RateLimited(platform.to_string());
        }

        EnumerationLine::Noise
    }

    /// Parse a full report.
    #[must_use]
    pub fn parse(&self, output: &str) -> EnumerationResult {
        let mut result = EnumerationResult::default();

        for line in output.lines() {
            match self.classify_line(line) {
                EnumerationLine::Confirmed(platform) => push_unique(&mut result.used_on, platform),
                EnumerationLine::RateLimited(platform) => {
                    push_unique(&mut result.rate_limited, platform);
                }
                EnumerationLine::Noise => {}
            }
        }

        result
    }

    fn is_noise(&self, line: &str) -> bool {
        let lowered = line.to_lowercase();
        self.noise_phrases
            .iter()
            .any(|phrase| lowered.contains(phrase.as_str()))
    }
}

impl Default for OutputParser {
    fn default() -> Self {
        Self::from_config(&ProbeConfig::default())
    }
}

fn strip_ansi(line: &str) -> Cow<'_, str> {
    ANSI_ESCAPE_REGEX.replace_all(line, "")
}

/// Text after `marker`, which must be followed by whitespace and a non-empty name.
fn marker_payload<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(marker)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let platform = rest.trim();
    (!platform.is_empty()).then_some(platform)
}

fn push_unique(list: &mut Vec<String>, platform: String) {
    if !list.contains(&platform) {
        list.push(platform);
    }
}
