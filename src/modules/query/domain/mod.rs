pub mod entities;
pub mod services;
pub mod value_objects;

// Re-exports for easy access
pub use entities::*;
pub use services::{NormalizationMetrics, NormalizerConfig, TitleNormalizer};
pub use value_objects::{SearchQuery, SearchUrlTemplate, SiteHint, TokenShape};
