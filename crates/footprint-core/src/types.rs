//! Shared types used across the footprint tools.

use crate::error::CoreError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shortest accepted identifier, in characters.
pub const MIN_IDENTIFIER_LEN: usize = 5;

/// Longest accepted identifier, in characters.
pub const MAX_IDENTIFIER_LEN: usize = 254;

/// Characters that must never reach an external-process argument list.
pub const SHELL_METACHARACTERS: [char; 10] = ['`', '$', '(', ')', ';', '|', '&', '<', '>', '\\'];

/// `local-part@domain.tld` shape accepted by [`Identifier::parse`].
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Newtype for a validated, normalized email identifier.
///
/// Construction trims surrounding whitespace and lower-cases the input, then
/// applies the length, content and shape checks in that order. The content
/// check is kept even though processes are spawned without a shell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier(String);

impl Identifier {
    /// Validate and normalize a raw identifier.
    ///
    /// # Errors
    /// Returns `CoreError::Validation` describing the first failed check.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let normalized = raw.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(CoreError::Validation(
                "Email must be a non-empty string".to_string(),
            ));
        }

        let len = normalized.chars().count();
        if !(MIN_IDENTIFIER_LEN..=MAX_IDENTIFIER_LEN).contains(&len) {
            return Err(CoreError::Validation(format!(
                "Email length must be between {MIN_IDENTIFIER_LEN} and {MAX_IDENTIFIER_LEN} characters"
            )));
        }

        if normalized.contains(SHELL_METACHARACTERS) {
            return Err(CoreError::Validation(
                "Email contains dangerous characters".to_string(),
            ));
        }

        if !EMAIL_REGEX.is_match(&normalized) {
            return Err(CoreError::Validation("Invalid email format".to_string()));
        }

        Ok(Self(normalized))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A log-safe rendering of this identifier.
    #[must_use]
    pub fn masked(&self) -> String {
        mask_identifier(&self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mask an identifier for logging: first two characters of the local part,
/// then `***`, then the domain if there is one.
///
/// ```rust
/// use footprint_core::mask_identifier;
///
/// assert_eq!(mask_identifier("alice@example.com"), "al***@example.com");
/// assert_eq!(mask_identifier("alice"), "al***");
/// ```
#[must_use]
pub fn mask_identifier(raw: &str) -> String {
    let (local, domain) = match raw.rfind('@') {
        Some(at) => (&raw[..at], Some(&raw[at..])),
        None => (raw, None),
    };

    let prefix: String = local.chars().take(2).collect();
    format!("{prefix}***{}", domain.unwrap_or(""))
}
