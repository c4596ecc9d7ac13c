pub mod rules_loader;

pub use rules_loader::{
    PatternRuleConfig, PlatformRulesConfig, RuleSetConfig, RulesLoader, RULES_PATH_ENV,
};
