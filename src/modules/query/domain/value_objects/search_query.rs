use std::fmt;

use crate::shared::errors::{AppError, AppResult};

/// Default price-comparison search endpoint; the encoded query is appended
pub const DEFAULT_SEARCH_URL: &str = "https://www.akakce.com/arama/?q=";

/// A normalized, non-empty search query
///
/// An empty normalization result never becomes a `SearchQuery`, so holding
/// one means there is something worth searching for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Option<Self> {
        let query = query.into();
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.len() == query.len() {
            Some(Self(query))
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    pub fn token_count(&self) -> usize {
        self.tokens().count()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// URL prefix the percent-encoded query is appended to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchUrlTemplate {
    prefix: String,
}

impl SearchUrlTemplate {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Like `new`, but rejects prefixes that are not absolute http(s) URLs
    pub fn parse(prefix: &str) -> AppResult<Self> {
        let prefix = prefix.trim();
        if !(prefix.starts_with("https://") || prefix.starts_with("http://")) {
            return Err(AppError::ValidationError(format!(
                "Search URL prefix must start with http:// or https://, got '{}'",
                prefix
            )));
        }
        if prefix.chars().any(char::is_whitespace) {
            return Err(AppError::ValidationError(format!(
                "Search URL prefix must not contain whitespace, got '{}'",
                prefix
            )));
        }
        Ok(Self::new(prefix))
    }

    pub fn url_for(&self, query: &SearchQuery) -> String {
        format!("{}{}", self.prefix, urlencoding::encode(query.as_str()))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for SearchUrlTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_URL)
    }
}
