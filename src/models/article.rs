//! Published article identifiers.

use crate::{Error, Result};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Zenn slug rule: 12 to 50 characters of lowercase letters, digits, `-` and `_`.
static SLUG_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]{12,50}$").ok());

/// Article identifier (slug) as used in the article's URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ArticleSlug(String);

impl ArticleSlug {
    /// Validates and wraps a slug.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the slug breaks the Zenn slug rule.
    pub fn new(slug: &str) -> Result<Self> {
        let slug = slug.trim();
        let valid = SLUG_PATTERN
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(slug));
        if !valid {
            return Err(Error::InvalidInput(format!(
                "slug '{slug}' must be 12-50 characters of a-z, 0-9, '-' or '_'"
            )));
        }
        Ok(Self(slug.to_string()))
    }

    /// Wraps a slug used to search the done log.
    ///
    /// Only surrounding whitespace is trimmed, so slugs of older records that
    /// predate the Zenn rule can still be looked up.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the slug is blank or spans lines.
    pub fn lookup(slug: &str) -> Result<Self> {
        let slug = slug.trim();
        if slug.is_empty() || slug.contains(['\n', '\r']) {
            return Err(Error::InvalidInput(format!(
                "slug to look up must be a single non-empty line, got '{slug}'"
            )));
        }
        Ok(Self(slug.to_string()))
    }

    /// Wraps a slug read back from the done log without re-validating it.
    ///
    /// Older hand-written records are kept readable even if they predate the rule.
    pub(crate) fn from_log(slug: &str) -> Self {
        Self(slug.to_string())
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Article title, always a single non-empty line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ArticleTitle(String);

impl ArticleTitle {
    /// Validates and wraps a title. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the title is blank or spans lines.
    pub fn new(title: &str) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput("title cannot be empty".to_string()));
        }
        if title.contains(['\n', '\r']) {
            return Err(Error::InvalidInput(
                "title must be a single line".to_string(),
            ));
        }
        Ok(Self(title.to_string()))
    }

    pub(crate) fn from_log(title: &str) -> Self {
        Self(title.to_string())
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
