use anyhow::Context;
use std::io::{BufRead, Write};

use crate::modules::query::application::QueryService;

/// Environment variable overriding the search URL prefix
pub const SEARCH_URL_ENV: &str = "PRICEQUERY_SEARCH_URL";

/// Split a request line into `(site_hint, title)`
///
/// Lines are either `site<TAB>title` or a bare title, which uses the default hint.
pub fn parse_line<'a>(line: &'a str, default_hint: &'a str) -> (&'a str, &'a str) {
    match line.split_once('\t') {
        Some((site, title)) => (site.trim(), title),
        None => (default_hint, line),
    }
}

/// Answer every request line with `query<TAB>url`, or an empty line when the
/// title has no usable query. Returns the number of usable queries.
pub fn process_lines<R: BufRead, W: Write>(
    service: &QueryService,
    default_hint: &str,
    reader: R,
    mut writer: W,
) -> anyhow::Result<usize> {
    let mut answered = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read input line {}", index + 1))?;
        let (site, title) = parse_line(&line, default_hint);

        match service.query(Some(title), site) {
            Some(query) => {
                let url = service.url_template().url_for(&query);
                writeln!(writer, "{}\t{}", query, url)?;
                answered += 1;
            }
            None => {
                log::warn!("No usable query for line {}", index + 1);
                writeln!(writer)?;
            }
        }
    }

    writer.flush().context("Failed to flush output")?;
    Ok(answered)
}
