/// Tuning constants for the title normalizer
///
/// The thresholds are heuristics and can be tuned per deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Minimum char length for a token to be treated as a model code
    pub model_code_min_len: usize,

    /// Number of leading tokens kept unconditionally
    pub core_tokens: usize,

    /// Hard cap on the number of tokens in the final query
    pub max_tokens: usize,

    /// Tokens shorter than this are dropped unless they contain a digit
    pub min_token_chars: usize,

    /// Remove `( ... )` and `[ ... ]` asides before symbol stripping
    pub strip_bracketed_asides: bool,

    /// Apply every matching platform bucket instead of only the first one
    pub match_all_platforms: bool,
}

impl NormalizerConfig {
    pub fn new() -> Self {
        Self {
            model_code_min_len: 6,
            core_tokens: 5,
            max_tokens: 10,
            min_token_chars: 2,
            strip_bracketed_asides: false,
            match_all_platforms: false,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_tokens == 0 {
            return Err("max_tokens must be > 0".to_string());
        }

        if self.core_tokens == 0 {
            return Err("core_tokens must be > 0".to_string());
        }

        if self.core_tokens > self.max_tokens {
            return Err(format!(
                "core_tokens ({}) cannot exceed max_tokens ({})",
                self.core_tokens, self.max_tokens
            ));
        }

        if self.min_token_chars == 0 {
            return Err("min_token_chars must be > 0".to_string());
        }

        // a model code needs room for at least one letter and one digit
        if self.model_code_min_len < 2 {
            return Err(format!(
                "model_code_min_len must be >= 2, got {}",
                self.model_code_min_len
            ));
        }

        Ok(())
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for NormalizerConfig
#[derive(Default)]
pub struct NormalizerConfigBuilder {
    config: NormalizerConfig,
}

impl NormalizerConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: NormalizerConfig::new(),
        }
    }

    pub fn model_code_min_len(mut self, len: usize) -> Self {
        self.config.model_code_min_len = len;
        self
    }

    pub fn core_tokens(mut self, count: usize) -> Self {
        self.config.core_tokens = count;
        self
    }

    pub fn max_tokens(mut self, count: usize) -> Self {
        self.config.max_tokens = count;
        self
    }

    pub fn min_token_chars(mut self, chars: usize) -> Self {
        self.config.min_token_chars = chars;
        self
    }

    pub fn strip_bracketed_asides(mut self, enable: bool) -> Self {
        self.config.strip_bracketed_asides = enable;
        self
    }

    pub fn match_all_platforms(mut self, enable: bool) -> Self {
        self.config.match_all_platforms = enable;
        self
    }

    pub fn build(self) -> Result<NormalizerConfig, String> {
        self.config.validate()?;
        Ok(self.config)
    }
}
