use std::fmt;

/// Identifier of the storefront a title was scraped from
///
/// Usually a hostname such as `www.amazon.com.tr`. It is only ever used as a
/// lookup key into the noise rules, so unknown hints are perfectly valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SiteHint(String);

impl SiteHint {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// Substring match against a platform key (`www.amazon.com.tr` matches `amazon`)
    pub fn matches(&self, key: &str) -> bool {
        !key.is_empty() && self.0.contains(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SiteHint {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for SiteHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
