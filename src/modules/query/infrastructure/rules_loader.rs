use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::modules::query::domain::entities::{NoiseRuleSet, ReplacementRule, RuleSet};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::LogContext;

/// Environment variable naming a JSON rule file
pub const RULES_PATH_ENV: &str = "PRICEQUERY_RULES";

fn default_replacement() -> String {
    " ".to_string()
}

/// One (pattern, replacement) pair as written in a rule file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRuleConfig {
    pub pattern: String,
    #[serde(default = "default_replacement")]
    pub replacement: String,
}

impl PatternRuleConfig {
    pub fn strip(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: default_replacement(),
        }
    }

    pub fn rewrite(pattern: &str, replacement: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }

    fn compile(&self) -> AppResult<ReplacementRule> {
        ReplacementRule::new(&self.pattern, self.replacement.as_str()).map_err(|e| match e {
            AppError::InvalidPattern(msg) => {
                AppError::InvalidPattern(format!("'{}': {}", self.pattern, msg))
            }
            other => other,
        })
    }
}

/// Noise rules of one storefront as written in a rule file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformRulesConfig {
    pub key: String,
    #[serde(default)]
    pub patterns: Vec<PatternRuleConfig>,
}

/// Plain-data description of every rule the normalizer uses
///
/// Missing sections fall back to the built-in rules, so a file that only
/// lists storefronts keeps the connector/unit rules. An explicit empty list
/// disables a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetConfig {
    #[serde(default = "builtin_platforms")]
    pub platforms: Vec<PlatformRulesConfig>,
    #[serde(default = "builtin_connectors")]
    pub connectors: Vec<PatternRuleConfig>,
}

impl RuleSetConfig {
    /// Compile every pattern, failing on the first invalid one
    pub fn compile(&self) -> AppResult<RuleSet> {
        let mut noise = NoiseRuleSet::new();
        for platform in &self.platforms {
            let rules = platform
                .patterns
                .iter()
                .map(PatternRuleConfig::compile)
                .collect::<AppResult<Vec<_>>>()?;
            noise = noise.with_platform(&platform.key, rules)?;
        }

        let connectors = self
            .connectors
            .iter()
            .map(PatternRuleConfig::compile)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(RuleSet::new(noise, connectors))
    }
}

impl Default for RuleSetConfig {
    fn default() -> Self {
        Self {
            platforms: builtin_platforms(),
            connectors: builtin_connectors(),
        }
    }
}

fn builtin_platforms() -> Vec<PlatformRulesConfig> {
    vec![
        PlatformRulesConfig {
            key: "amazon".to_string(),
            patterns: vec![
                PatternRuleConfig::strip(r"amazon\.com\.tr"),
                PatternRuleConfig::strip(r"\bamazon'?a\s+özel\b"),
                PatternRuleConfig::strip(r"\byeni\b"),
                PatternRuleConfig::strip(r"\bözel\b"),
                PatternRuleConfig::strip(r"\bstokta\s+(?:var|sınırlı)\b"),
            ],
        },
        PlatformRulesConfig {
            key: "trendyol".to_string(),
            patterns: vec![
                PatternRuleConfig::strip(r"trendyol(?:\.com)?"),
                PatternRuleConfig::strip(r"\bkargo\s+bedava\b"),
                PatternRuleConfig::strip(r"\bhızlı\s+teslimat\b"),
                PatternRuleConfig::strip(r"\bbugün\s+kargoda\b"),
                PatternRuleConfig::strip(r"\bçok\s+satan\b"),
            ],
        },
        PlatformRulesConfig {
            key: "hepsiburada".to_string(),
            patterns: vec![
                PatternRuleConfig::strip(r"hepsiburada(?:\.com)?"),
                PatternRuleConfig::strip(r"\bsüper\s+(?:fiyat|fırsat)\b"),
                PatternRuleConfig::strip(r"\bücretsiz\s+kargo\b"),
                PatternRuleConfig::strip(r"\bresmi\s+satıcı\b"),
                PatternRuleConfig::strip(r"\byarın\s+kapında\b"),
            ],
        },
    ]
}

fn builtin_connectors() -> Vec<PatternRuleConfig> {
    vec![
        PatternRuleConfig::rewrite(r"\b(usb|type)[\s-]+c\b", "${1}c"),
        PatternRuleConfig::rewrite(
            r"(\d)\s+(gb|tb|mb|mah|ml|mg|mm|cm|lt|l|hz|dpi|w|inç)\b",
            "${1}${2}",
        ),
        PatternRuleConfig::rewrite(r#"(\d)\s+(["”″])"#, "${1}${2}"),
    ]
}

/// Loads and compiles rule sets
pub struct RulesLoader;

impl RulesLoader {
    /// The built-in storefront and connector rules
    pub fn builtin() -> RuleSet {
        RuleSetConfig::default()
            .compile()
            .expect("built-in rules must compile")
    }

    pub fn from_json_str(json: &str) -> AppResult<RuleSet> {
        let config: RuleSetConfig = serde_json::from_str(json)?;
        let rules = config.compile()?;
        LogContext::rules_loaded("JSON", rules.noise.platform_count(), rules.connectors.len());
        Ok(rules)
    }

    pub fn from_path(path: impl AsRef<Path>) -> AppResult<RuleSet> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: RuleSetConfig = serde_json::from_str(&json)?;
        let rules = config.compile()?;
        LogContext::rules_loaded(
            &path.display().to_string(),
            rules.noise.platform_count(),
            rules.connectors.len(),
        );
        Ok(rules)
    }

    /// Rules from the file named by `PRICEQUERY_RULES`, or the built-in ones
    pub fn from_env() -> AppResult<RuleSet> {
        match std::env::var(RULES_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_path(path.trim()),
            _ => {
                let rules = Self::builtin();
                LogContext::rules_loaded(
                    "built-in defaults",
                    rules.noise.platform_count(),
                    rules.connectors.len(),
                );
                Ok(rules)
            }
        }
    }
}
