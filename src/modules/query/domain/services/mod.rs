pub mod query_processor;

pub use query_processor::{NormalizationMetrics, NormalizerConfig, TitleNormalizer};
