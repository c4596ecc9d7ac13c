use crate::modules::query::domain::value_objects::TokenShape;

/// Stage operating on the token sequence after symbol stripping
pub trait TokenTransformation: Send + Sync {
    fn apply(&self, tokens: Vec<String>) -> Vec<String>;
    fn name(&self) -> &'static str;
}

/// Split on runs of whitespace
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Drops stray short tokens unless they carry a digit (`4` survives, `x` does not)
#[derive(Debug, Clone)]
pub struct TrivialTokenFilter {
    min_chars: usize,
}

impl TrivialTokenFilter {
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }
}

impl TokenTransformation for TrivialTokenFilter {
    fn apply(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|token| !token.is_trivial(self.min_chars))
            .collect()
    }

    fn name(&self) -> &'static str {
        "TrivialTokenFilter"
    }
}

/// Moves the first model-code-looking token to the front of the query
#[derive(Debug, Clone)]
pub struct ModelCodePromotion {
    min_len: usize,
}

impl ModelCodePromotion {
    pub fn new(min_len: usize) -> Self {
        Self { min_len }
    }

    pub fn find(&self, tokens: &[String]) -> Option<usize> {
        tokens
            .iter()
            .position(|token| token.looks_like_model_code(self.min_len))
    }
}

impl TokenTransformation for ModelCodePromotion {
    fn apply(&self, mut tokens: Vec<String>) -> Vec<String> {
        if let Some(index) = self.find(&tokens) {
            let code = tokens.remove(index);
            log::trace!("Promoting model code '{}' from position {}", code, index);
            tokens.insert(0, code);
        }
        tokens
    }

    fn name(&self) -> &'static str {
        "ModelCodePromotion"
    }
}

/// Keeps the leading core tokens plus numeric qualifiers, capped at `max`
#[derive(Debug, Clone)]
pub struct TokenBudget {
    core: usize,
    max: usize,
}

impl TokenBudget {
    pub fn new(core: usize, max: usize) -> Self {
        Self { core, max }
    }
}

impl TokenTransformation for TokenBudget {
    fn apply(&self, tokens: Vec<String>) -> Vec<String> {
        let mut iter = tokens.into_iter();
        let mut kept: Vec<String> = iter.by_ref().take(self.core).collect();
        kept.extend(iter.filter(|token| token.has_digit()));
        kept.truncate(self.max);
        kept
    }

    fn name(&self) -> &'static str {
        "TokenBudget"
    }
}
