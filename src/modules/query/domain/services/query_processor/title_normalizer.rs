use regex::Regex;
use std::sync::LazyLock;

use super::config::NormalizerConfig;
use super::metrics::{MetricsBuilder, NormalizationMetrics, StageTimer};
use super::token_pipeline::{
    tokenize, ModelCodePromotion, TokenBudget, TokenTransformation, TrivialTokenFilter,
};
use crate::modules::query::domain::entities::{NoiseRuleSet, ReplacementRule, RuleSet};
use crate::modules::query::domain::value_objects::{SiteHint, TokenShape};
use crate::shared::errors::{AppError, AppResult};

static BRACKETED_ASIDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)|\[[^\]]*\]").expect("Invalid regex"));

/// Text-level transformation applied before tokenization
///
/// Each transformation is composable and testable in isolation. The site hint
/// is passed along for the stages that depend on the storefront.
pub trait TitleTransformation: Send + Sync {
    fn transform(&self, title: &str, site: &SiteHint) -> String;
    fn name(&self) -> &'static str;
}

/// Case-folds the title
///
/// `İ` is folded to a plain `i` first: the Unicode lowercase of it carries a
/// combining dot that symbol stripping would turn into a token break.
#[derive(Debug, Clone)]
pub struct LowercaseTransform;

impl TitleTransformation for LowercaseTransform {
    fn transform(&self, title: &str, _site: &SiteHint) -> String {
        title.replace('İ', "i").to_lowercase()
    }

    fn name(&self) -> &'static str {
        "Lowercase"
    }
}

/// Removes `( ... )` and `[ ... ]` asides
#[derive(Debug, Clone)]
pub struct RemoveBracketedAsidesTransform;

impl TitleTransformation for RemoveBracketedAsidesTransform {
    fn transform(&self, title: &str, _site: &SiteHint) -> String {
        BRACKETED_ASIDE.replace_all(title, " ").into_owned()
    }

    fn name(&self) -> &'static str {
        "RemoveBracketedAsides"
    }
}

/// Strips storefront marketing phrases selected by the site hint
#[derive(Debug, Clone)]
pub struct PlatformNoiseTransform {
    rules: NoiseRuleSet,
    match_all: bool,
}

impl PlatformNoiseTransform {
    pub fn new(rules: NoiseRuleSet, match_all: bool) -> Self {
        Self { rules, match_all }
    }

    /// Keys of the buckets this transform applies for the hint
    pub fn matched_keys(&self, site: &SiteHint) -> Vec<&str> {
        self.rules
            .select(site, self.match_all)
            .into_iter()
            .map(|platform| platform.key())
            .collect()
    }
}

impl TitleTransformation for PlatformNoiseTransform {
    fn transform(&self, title: &str, site: &SiteHint) -> String {
        self.rules
            .select(site, self.match_all)
            .into_iter()
            .fold(title.to_string(), |acc, platform| {
                log::debug!(
                    "Applying {} noise rule(s) for platform '{}' (hint '{}')",
                    platform.rules().len(),
                    platform.key(),
                    site
                );
                platform.apply(&acc)
            })
    }

    fn name(&self) -> &'static str {
        "PlatformNoise"
    }
}

/// Joins connector names and number/unit pairs into single tokens (`usb-c`, `8 gb`)
#[derive(Debug, Clone)]
pub struct ConnectorUnitTransform {
    rules: Vec<ReplacementRule>,
}

impl ConnectorUnitTransform {
    pub fn new(rules: Vec<ReplacementRule>) -> Self {
        Self { rules }
    }
}

impl TitleTransformation for ConnectorUnitTransform {
    fn transform(&self, title: &str, _site: &SiteHint) -> String {
        self.rules
            .iter()
            .fold(title.to_string(), |acc, rule| rule.apply(&acc))
    }

    fn name(&self) -> &'static str {
        "ConnectorUnit"
    }
}

/// Replaces every symbol with a space
///
/// Kept: ASCII word characters, whitespace, the hyphen (model codes such as
/// `82xm-00pv` use it) and the letters of Latin-1 / Latin Extended-A, which
/// cover the Turkish alphabet.
#[derive(Debug, Clone)]
pub struct RemoveSymbolsTransform;

impl RemoveSymbolsTransform {
    fn is_kept(c: char) -> bool {
        c.is_ascii_alphanumeric()
            || c == '_'
            || c == '-'
            || c.is_whitespace()
            || (matches!(c, '\u{00C0}'..='\u{017F}') && c.is_alphabetic())
    }
}

impl TitleTransformation for RemoveSymbolsTransform {
    fn transform(&self, title: &str, _site: &SiteHint) -> String {
        title
            .chars()
            .map(|c| if Self::is_kept(c) { c } else { ' ' })
            .collect()
    }

    fn name(&self) -> &'static str {
        "RemoveSymbols"
    }
}

/// Turns a raw product title into a short search query
///
/// Text transformations run first, then the title is split into tokens and
/// the token stages run in order. Uses the builder pattern for composability.
pub struct TitleNormalizer {
    transformations: Vec<Box<dyn TitleTransformation>>,
    token_stages: Vec<Box<dyn TokenTransformation>>,
    platform_noise: Option<PlatformNoiseTransform>,
    config: NormalizerConfig,
}

impl TitleNormalizer {
    /// Create a normalizer with an empty pipeline
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            transformations: Vec::new(),
            token_stages: Vec::new(),
            platform_noise: None,
            config,
        }
    }

    /// Create the standard pipeline for the given rules
    ///
    /// Fails with `ValidationError` when the tuning constants are inconsistent.
    pub fn from_rules(rules: RuleSet, config: NormalizerConfig) -> AppResult<Self> {
        config.validate().map_err(AppError::ValidationError)?;

        let mut normalizer = Self::new(config.clone()).with_lowercase();
        if config.strip_bracketed_asides {
            normalizer = normalizer.with_remove_bracketed_asides();
        }

        Ok(normalizer
            .with_platform_noise(rules.noise, config.match_all_platforms)
            .with_connectors(rules.connectors)
            .with_remove_symbols()
            .with_trivial_token_filter(config.min_token_chars)
            .with_model_code_promotion(config.model_code_min_len)
            .with_token_budget(config.core_tokens, config.max_tokens))
    }

    pub fn with_lowercase(mut self) -> Self {
        self.transformations.push(Box::new(LowercaseTransform));
        self
    }

    pub fn with_remove_bracketed_asides(mut self) -> Self {
        self.transformations
            .push(Box::new(RemoveBracketedAsidesTransform));
        self
    }

    pub fn with_platform_noise(mut self, rules: NoiseRuleSet, match_all: bool) -> Self {
        let transform = PlatformNoiseTransform::new(rules, match_all);
        // kept for metrics reporting
        self.platform_noise = Some(transform.clone());
        self.transformations.push(Box::new(transform));
        self
    }

    pub fn with_connectors(mut self, rules: Vec<ReplacementRule>) -> Self {
        self.transformations
            .push(Box::new(ConnectorUnitTransform::new(rules)));
        self
    }

    pub fn with_remove_symbols(mut self) -> Self {
        self.transformations.push(Box::new(RemoveSymbolsTransform));
        self
    }

    pub fn with_trivial_token_filter(mut self, min_chars: usize) -> Self {
        self.token_stages
            .push(Box::new(TrivialTokenFilter::new(min_chars)));
        self
    }

    pub fn with_model_code_promotion(mut self, min_len: usize) -> Self {
        self.token_stages
            .push(Box::new(ModelCodePromotion::new(min_len)));
        self
    }

    pub fn with_token_budget(mut self, core: usize, max: usize) -> Self {
        self.token_stages.push(Box::new(TokenBudget::new(core, max)));
        self
    }

    /// Normalize a title into a query string; empty when nothing usable is left
    pub fn clean(&self, title: &str, site_hint: &str) -> String {
        self.run(title, site_hint, None)
    }

    /// Same as `clean`, also reporting stage timings and token accounting
    pub fn clean_with_metrics(&self, title: &str, site_hint: &str) -> (String, NormalizationMetrics) {
        let mut builder = MetricsBuilder::new();
        builder.start_pipeline();
        let query = self.run(title, site_hint, Some(&mut builder));
        builder.stop_pipeline();
        (query, builder.build())
    }

    fn run(&self, title: &str, site_hint: &str, mut metrics: Option<&mut MetricsBuilder>) -> String {
        if title.trim().is_empty() {
            return String::new();
        }

        let site = SiteHint::new(site_hint);
        let mut text = title.to_string();

        if let (Some(noise), Some(builder)) = (&self.platform_noise, metrics.as_deref_mut()) {
            for key in noise.matched_keys(&site) {
                builder.matched_platform(key);
            }
        }

        for transformation in &self.transformations {
            let timer = metrics
                .is_some()
                .then(|| StageTimer::start(transformation.name()));
            text = transformation.transform(&text, &site);
            if let (Some(timer), Some(builder)) = (timer, metrics.as_deref_mut()) {
                timer.stop(builder);
            }
            log::trace!("After {}: '{}'", transformation.name(), text);
        }

        let mut tokens = tokenize(&text);
        if let Some(builder) = metrics.as_deref_mut() {
            builder.raw_token_count(tokens.len());
        }

        for stage in &self.token_stages {
            let timer = metrics.is_some().then(|| StageTimer::start(stage.name()));
            let before = tokens.len();
            tokens = stage.apply(tokens);
            if let Some(builder) = metrics.as_deref_mut() {
                if let Some(timer) = timer {
                    timer.stop(builder);
                }
                builder.tokens_dropped(stage.name(), before.saturating_sub(tokens.len()));
            }
            log::trace!("After {}: {:?}", stage.name(), tokens);
        }

        if let Some(builder) = metrics {
            builder.output_token_count(tokens.len());
            if let Some(code) = tokens
                .first()
                .filter(|token| token.looks_like_model_code(self.config.model_code_min_len))
            {
                builder.promoted_model_code(code.as_str());
            }
        }

        tokens.join(" ")
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn transformation_count(&self) -> usize {
        self.transformations.len()
    }

    pub fn token_stage_count(&self) -> usize {
        self.token_stages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hint(raw: &str) -> SiteHint {
        SiteHint::new(raw)
    }

    fn test_rules() -> RuleSet {
        let noise = NoiseRuleSet::new()
            .with_platform(
                "hepsiburada",
                vec![
                    ReplacementRule::new(r"hepsiburada(?:\.com)?", " ").unwrap(),
                    ReplacementRule::new(r"\bsüper\s+fiyat\b", " ").unwrap(),
                ],
            )
            .unwrap()
            .with_platform(
                "amazon",
                vec![
                    ReplacementRule::new(r"amazon\.com\.tr", " ").unwrap(),
                    ReplacementRule::new(r"\byeni\b", " ").unwrap(),
                ],
            )
            .unwrap();
        let connectors = vec![
            ReplacementRule::new(r"\b(usb|type)[\s-]+c\b", "${1}c").unwrap(),
            ReplacementRule::new(r"(\d)\s+(gb|tb|ml|hz)\b", "${1}${2}").unwrap(),
        ];
        RuleSet::new(noise, connectors)
    }

    fn normalizer() -> TitleNormalizer {
        TitleNormalizer::from_rules(test_rules(), NormalizerConfig::default()).unwrap()
    }

    // Individual transformation tests

    #[test]
    fn test_lowercase_transform() {
        let transform = LowercaseTransform;
        assert_eq!(transform.transform("ŞARJ Kablosu", &hint("")), "şarj kablosu");
        assert_eq!(transform.transform("İPHONE", &hint("")), "iphone");
    }

    #[test]
    fn test_remove_bracketed_asides_transform() {
        let transform = RemoveBracketedAsidesTransform;
        assert_eq!(
            transform.transform("kulaklık (siyah) [2024]", &hint("")),
            "kulaklık    "
        );
    }

    #[test]
    fn test_platform_noise_uses_hint() {
        let transform = PlatformNoiseTransform::new(test_rules().noise, false);
        assert_eq!(
            transform.transform("yeni kılıf", &hint("www.amazon.com.tr")),
            "  kılıf"
        );
        // unknown storefront leaves the title untouched
        assert_eq!(transform.transform("yeni kılıf", &hint("n11.com")), "yeni kılıf");
    }

    #[test]
    fn test_connector_unit_transform() {
        let transform = ConnectorUnitTransform::new(test_rules().connectors);
        assert_eq!(
            transform.transform("usb-c kablo 8 gb type c", &hint("")),
            "usbc kablo 8gb typec"
        );
    }

    #[test]
    fn test_remove_symbols_transform() {
        let transform = RemoveSymbolsTransform;
        assert_eq!(
            transform.transform("82xm-00pv, çğıöşü™!", &hint("")),
            "82xm-00pv  çğıöşü  "
        );
        // symbols inside the Latin-1 block are not letters
        assert_eq!(transform.transform("a×b", &hint("")), "a b");
    }

    // Pipeline tests

    #[test]
    fn test_empty_pipeline_only_collapses_whitespace() {
        let normalizer = TitleNormalizer::new(NormalizerConfig::default());
        assert_eq!(normalizer.clean("  Foo   Bar ", ""), "Foo Bar");
        assert_eq!(normalizer.transformation_count(), 0);
        assert_eq!(normalizer.token_stage_count(), 0);
    }

    #[test]
    fn test_standard_pipeline_shape() {
        let normalizer = normalizer();
        assert_eq!(normalizer.transformation_count(), 4);
        assert_eq!(normalizer.token_stage_count(), 3);

        let config = NormalizerConfig {
            strip_bracketed_asides: true,
            ..NormalizerConfig::default()
        };
        let with_brackets = TitleNormalizer::from_rules(test_rules(), config).unwrap();
        assert_eq!(with_brackets.transformation_count(), 5);
    }

    #[test]
    fn test_clean_amazon_title() {
        let result = normalizer().clean(
            "Apple iPhone 15 (256 GB, Mavi) - Yeni Amazon.com.tr",
            "amazon.com.tr",
        );
        assert_eq!(result, "apple iphone 15 256gb mavi");
    }

    #[test]
    fn test_clean_hepsiburada_title() {
        let result = normalizer().clean(
            "Hepsiburada Süper Fiyat Telefon Kılıfı",
            "www.hepsiburada.com",
        );
        assert_eq!(result, "telefon kılıfı");
    }

    #[test]
    fn test_model_code_anchors_query() {
        let result = normalizer().clean("Wireless Laptop 82XM00PVTX 16 GB RAM", "");
        assert_eq!(result, "82xm00pvtx wireless laptop 16gb ram");
    }

    #[test]
    fn test_multi_char_hyphen_tokens_are_kept() {
        let normalizer = normalizer();
        assert_eq!(normalizer.clean("Kulaklık -- Siyah", ""), "kulaklık -- siyah");
        // `--` holds a core slot, pushing `ee` out of the core
        assert_eq!(
            normalizer.clean("aa -- bb cc dd ee ff 8", ""),
            "aa -- bb cc dd 8"
        );
    }

    #[test]
    fn test_invalid_tuning_is_rejected() {
        let config = NormalizerConfig {
            core_tokens: 0,
            max_tokens: 0,
            ..NormalizerConfig::default()
        };
        let result = TitleNormalizer::from_rules(test_rules(), config);
        assert!(matches!(result, Err(AppError::ValidationError(_))));

        let config = NormalizerConfig {
            core_tokens: 8,
            max_tokens: 4,
            ..NormalizerConfig::default()
        };
        assert!(TitleNormalizer::from_rules(test_rules(), config).is_err());
    }

    #[test]
    fn test_bracketed_asides_option() {
        let config = NormalizerConfig {
            strip_bracketed_asides: true,
            ..NormalizerConfig::default()
        };
        let normalizer = TitleNormalizer::from_rules(test_rules(), config).unwrap();
        assert_eq!(
            normalizer.clean("Apple iPhone 15 (256 GB, Mavi)", ""),
            "apple iphone 15"
        );
    }

    #[test]
    fn test_empty_and_blank_titles() {
        let normalizer = normalizer();
        assert_eq!(normalizer.clean("", "amazon.com.tr"), "");
        assert_eq!(normalizer.clean("   \t\n", ""), "");
        assert_eq!(normalizer.clean("!!! ??? ***", ""), "");
    }

    #[test]
    fn test_metrics_account_for_dropped_tokens() {
        let title = "Lenovo IdeaPad 82XM00PVTX Slim 3 Dizüstü Bilgisayar Gri Renk 16 GB x";
        let (query, metrics) = normalizer().clean_with_metrics(title, "");

        assert_eq!(query, "82xm00pvtx lenovo ideapad slim 3 16gb");
        assert!(metrics.matched_platforms.is_empty());
        assert_eq!(metrics.raw_token_count, 11);
        assert_eq!(metrics.output_token_count, 6);
        assert_eq!(metrics.tokens_dropped["TrivialTokenFilter"], 1);
        assert_eq!(metrics.tokens_dropped["TokenBudget"], 4);
        assert_eq!(metrics.promoted_model_code.as_deref(), Some("82xm00pvtx"));
        assert!(metrics.stage_durations.contains_key("RemoveSymbols"));
        assert!(metrics.stage_durations.contains_key("TokenBudget"));
    }

    #[test]
    fn test_metrics_record_matched_platform() {
        let (_, metrics) = normalizer()
            .clean_with_metrics("Hepsiburada Süper Fiyat Telefon Kılıfı", "www.hepsiburada.com");
        assert_eq!(metrics.matched_platforms, vec!["hepsiburada".to_string()]);
        assert!(metrics.report().contains("Platforms: hepsiburada"));
    }

    #[test]
    fn test_clean_and_clean_with_metrics_agree() {
        let normalizer = normalizer();
        let title = "Samsung Galaxy Buds2 Pro USB-C Kablosuz Kulaklık";
        let (query, _) = normalizer.clean_with_metrics(title, "trendyol.com");
        assert_eq!(query, normalizer.clean(title, "trendyol.com"));
    }
}
