use regex::{Regex, RegexBuilder};

use crate::modules::query::domain::value_objects::SiteHint;
use crate::shared::errors::{AppError, AppResult};

/// A compiled (pattern, replacement) pair
///
/// Patterns are always case-insensitive. The replacement may reference
/// capture groups (`${1}`).
#[derive(Debug, Clone)]
pub struct ReplacementRule {
    regex: Regex,
    replacement: String,
}

impl ReplacementRule {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> AppResult<Self> {
        if pattern.is_empty() {
            return Err(AppError::InvalidPattern(
                "Pattern cannot be empty".to_string(),
            ));
        }
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            regex,
            replacement: replacement.into(),
        })
    }

    pub fn apply(&self, text: &str) -> String {
        self.regex
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Ordered noise rules of one storefront
#[derive(Debug, Clone)]
pub struct PlatformRules {
    key: String,
    rules: Vec<ReplacementRule>,
}

impl PlatformRules {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn rules(&self) -> &[ReplacementRule] {
        &self.rules
    }

    /// Applies every rule in order; later rules see earlier output
    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }
}

/// Storefront key -> ordered noise rules, in declaration order
///
/// Immutable once built: callers wanting different rules build a new set and
/// swap it in as a whole.
#[derive(Debug, Clone, Default)]
pub struct NoiseRuleSet {
    platforms: Vec<PlatformRules>,
}

impl NoiseRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a platform bucket. Keys are lower-cased and must be unique.
    pub fn with_platform(mut self, key: &str, rules: Vec<ReplacementRule>) -> AppResult<Self> {
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return Err(AppError::ConfigError(
                "Platform key cannot be empty".to_string(),
            ));
        }
        if self.platforms.iter().any(|p| p.key == key) {
            return Err(AppError::ConfigError(format!(
                "Duplicate platform key '{}'",
                key
            )));
        }
        self.platforms.push(PlatformRules { key, rules });
        Ok(self)
    }

    /// Buckets whose key is a substring of the hint, in declaration order.
    ///
    /// With `match_all == false` only the first such bucket is returned.
    pub fn select(&self, hint: &SiteHint, match_all: bool) -> Vec<&PlatformRules> {
        let mut matching = self.platforms.iter().filter(|p| hint.matches(&p.key));
        if match_all {
            matching.collect()
        } else {
            matching.next().into_iter().collect()
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.platforms.iter().map(|p| p.key.as_str())
    }

    pub fn platform_count(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

/// Everything the normalizer needs from configuration
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub noise: NoiseRuleSet,
    /// Connector and unit rules, applied to every title regardless of platform
    pub connectors: Vec<ReplacementRule>,
}

impl RuleSet {
    pub fn new(noise: NoiseRuleSet, connectors: Vec<ReplacementRule>) -> Self {
        Self { noise, connectors }
    }
}
