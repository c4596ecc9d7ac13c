pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::QueryService;
pub use domain::{
    NoiseRuleSet, NormalizationMetrics, NormalizerConfig, ReplacementRule, RuleSet, SearchQuery,
    SearchUrlTemplate, SiteHint, TitleNormalizer,
};
pub use infrastructure::{RuleSetConfig, RulesLoader};
