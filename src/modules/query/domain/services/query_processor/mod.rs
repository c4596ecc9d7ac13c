/// Query processor turning noisy storefront titles into search queries.
///
/// # Architecture
///
/// - **Pipeline Pattern**: `TitleTransformation` text stages followed by
///   `TokenTransformation` token stages
/// - **Builder Pattern**: `TitleNormalizer` for composable pipelines
/// - **Configuration Pattern**: `NormalizerConfig` for the tunable thresholds
/// - **Metrics Pattern**: `NormalizationMetrics` for diagnostics
///
/// # Usage
///
/// ```rust,ignore
/// let normalizer = TitleNormalizer::from_rules(rules, NormalizerConfig::default())?;
/// let query = normalizer.clean("Apple iPhone 15 128 GB", "www.amazon.com.tr");
/// ```
pub mod config;
pub mod metrics;
pub mod title_normalizer;
pub mod token_pipeline;

// Re-export main types
pub use config::{NormalizerConfig, NormalizerConfigBuilder};
pub use metrics::{MetricsBuilder, NormalizationMetrics, StageTimer};
pub use title_normalizer::{
    ConnectorUnitTransform, LowercaseTransform, PlatformNoiseTransform,
    RemoveBracketedAsidesTransform, RemoveSymbolsTransform, TitleNormalizer, TitleTransformation,
};
pub use token_pipeline::{
    tokenize, ModelCodePromotion, TokenBudget, TokenTransformation, TrivialTokenFilter,
};
