/// Shape checks used by the token stages
///
/// Lengths are counted in chars, so `şu` is two characters long even though
/// it takes three bytes.
pub trait TokenShape {
    fn char_len(&self) -> usize;
    fn has_digit(&self) -> bool;
    fn has_letter(&self) -> bool;

    /// Manufacturer part-number heuristic: long enough and mixes letters with digits
    fn looks_like_model_code(&self, min_len: usize) -> bool {
        self.char_len() >= min_len && self.has_letter() && self.has_digit()
    }

    /// Leftover of symbol stripping with no search value (`x`, `-`)
    fn is_trivial(&self, min_chars: usize) -> bool;
}

impl TokenShape for str {
    fn char_len(&self) -> usize {
        self.chars().count()
    }

    fn has_digit(&self) -> bool {
        self.chars().any(|c| c.is_ascii_digit())
    }

    fn has_letter(&self) -> bool {
        self.chars().any(char::is_alphabetic)
    }

    fn is_trivial(&self, min_chars: usize) -> bool {
        if self.has_digit() {
            return false;
        }
        self.char_len() < min_chars
    }
}
