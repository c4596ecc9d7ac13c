pub mod modules;
pub mod shared;

use anyhow::Context;
use modules::query::{
    commands::{process_lines, SEARCH_URL_ENV},
    NormalizerConfig, QueryService, RulesLoader, SearchUrlTemplate, TitleNormalizer,
};
use shared::utils::init_logger;

/// Command-line entry point
///
/// Reads `site<TAB>title` (or bare title) lines from stdin and prints the
/// normalized query and search URL for each. The first argument is the site
/// hint used for bare titles.
pub fn run() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    init_logger();

    let default_hint = std::env::args().nth(1).unwrap_or_default();

    let rules = RulesLoader::from_env().context("Failed to load query rules")?;
    let normalizer = TitleNormalizer::from_rules(rules, NormalizerConfig::default())
        .context("Invalid normalizer tuning")?;
    let mut service = QueryService::new(normalizer);

    if let Ok(prefix) = std::env::var(SEARCH_URL_ENV) {
        let template = SearchUrlTemplate::parse(&prefix)
            .with_context(|| format!("Invalid {}", SEARCH_URL_ENV))?;
        log::info!("Using search URL prefix {}", template.prefix());
        service = service.with_url_template(template);
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let answered = process_lines(&service, &default_hint, stdin.lock(), stdout.lock())?;
    log::info!("Answered {} title(s) with a usable query", answered);

    Ok(())
}
