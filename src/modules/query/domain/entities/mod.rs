pub mod noise_rules;

pub use noise_rules::{NoiseRuleSet, PlatformRules, ReplacementRule, RuleSet};
