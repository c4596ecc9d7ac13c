use log::{debug, info};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logging system
/// This should be called once at application startup
pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info) // Default level
            .filter_module("pricequery_lib", log::LevelFilter::Debug) // More verbose for our crate
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .init();

        info!("Logging system initialized");
    });
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log rule set loading
    pub fn rules_loaded(source: &str, platforms: usize, connectors: usize) {
        info!(
            "Rules: loaded {} platform bucket(s) and {} connector rule(s) from {}",
            platforms, connectors, source
        );
    }

    /// Log a normalized query
    pub fn query_built(site_hint: &str, raw_title: &str, query: Option<&str>) {
        match query {
            Some(q) => debug!("Query: [{}] '{}' -> '{}'", site_hint, raw_title, q),
            None => debug!("Query: [{}] '{}' produced no usable query", site_hint, raw_title),
        }
    }

    /// Log errors with context
    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        log::error!("{}: {}", context, error);
    }
}
