use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::modules::query::domain::entities::RuleSet;
use crate::modules::query::domain::services::{NormalizerConfig, TitleNormalizer};
use crate::modules::query::domain::value_objects::{SearchQuery, SearchUrlTemplate};
use crate::modules::query::infrastructure::RulesLoader;
use crate::shared::errors::AppResult;
use crate::shared::utils::LogContext;

/// Application facade used by whatever scrapes the titles
///
/// Holds the current normalizer behind an `Arc` that is replaced as a whole
/// when rules change, so a caller always sees one complete rule set.
pub struct QueryService {
    normalizer: RwLock<Arc<TitleNormalizer>>,
    url_template: SearchUrlTemplate,
}

impl QueryService {
    pub fn new(normalizer: TitleNormalizer) -> Self {
        Self {
            normalizer: RwLock::new(Arc::new(normalizer)),
            url_template: SearchUrlTemplate::default(),
        }
    }

    /// Built-in rules with the default tuning
    pub fn with_defaults() -> Self {
        Self::new(
            TitleNormalizer::from_rules(RulesLoader::builtin(), NormalizerConfig::default())
                .expect("default tuning must validate"),
        )
    }

    pub fn with_url_template(mut self, template: SearchUrlTemplate) -> Self {
        self.url_template = template;
        self
    }

    /// Snapshot of the current normalizer
    pub fn normalizer(&self) -> Arc<TitleNormalizer> {
        let guard = self
            .normalizer
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Normalize a scraped title; `None` when there is nothing worth searching for
    pub fn query(&self, title: Option<&str>, site_hint: &str) -> Option<SearchQuery> {
        let raw = title.unwrap_or_default();
        let query = SearchQuery::new(self.normalizer().clean(raw, site_hint));
        LogContext::query_built(site_hint, raw, query.as_ref().map(SearchQuery::as_str));
        query
    }

    /// Search URL for a scraped title; `None` when the query would be empty
    pub fn search_url(&self, title: Option<&str>, site_hint: &str) -> Option<String> {
        self.query(title, site_hint)
            .map(|query| self.url_template.url_for(&query))
    }

    pub fn url_template(&self) -> &SearchUrlTemplate {
        &self.url_template
    }

    /// Swap in a normalizer built from new rules, keeping the current tuning
    pub fn replace_rules(&self, rules: RuleSet) -> AppResult<()> {
        let config = self.normalizer().config().clone();
        let next = Arc::new(TitleNormalizer::from_rules(rules, config)?);

        let mut guard = self
            .normalizer
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = next;
        log::info!("Query rules replaced");
        Ok(())
    }

    /// Load rules from a JSON file and swap them in; on error the current rules stay
    pub fn reload_from_path(&self, path: impl AsRef<Path>) -> AppResult<()> {
        match RulesLoader::from_path(path.as_ref()).and_then(|rules| self.replace_rules(rules)) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::warn!(
                    "Keeping current query rules, reload from {} failed",
                    path.as_ref().display()
                );
                LogContext::error_with_context(&e, "Rule reload failed");
                Err(e)
            }
        }
    }
}

impl Default for QueryService {
    fn default() -> Self {
        Self::with_defaults()
    }
}
