//! Simple word tokenizer implementation.

use lazy_static::lazy_static;
use regex::Regex;

use super::Tokenizer;

use crate::dataset::TokenSequence;
use crate::error::{KategoriaError, Result};

lazy_static! {
    static ref DEFAULT_WORD_PATTERN: Regex = Regex::new(r"[a-z0-9']+").unwrap();
}

/// A tokenizer that lowercases text and extracts word runs with a regex.
///
/// The default pattern `[a-z0-9']+` keeps alphanumeric runs and internal
/// apostrophes, which is a reasonable normalization for English review
/// text.
#[derive(Clone, Debug)]
pub struct SimpleTokenizer {
    pattern: Regex,
}

impl SimpleTokenizer {
    /// Create a new simple tokenizer with the default word pattern.
    pub fn new() -> Self {
        SimpleTokenizer {
            pattern: DEFAULT_WORD_PATTERN.clone(),
        }
    }

    /// Create a simple tokenizer with a custom pattern, applied to the
    /// lowercased text.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| KategoriaError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(SimpleTokenizer { pattern: regex })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for SimpleTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenSequence> {
        let lowered = text.to_lowercase();
        Ok(self
            .pattern
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect())
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokenizer_lowercases() {
        let tokenizer = SimpleTokenizer::new();
        let tokens = tokenizer.tokenize("Good Movie, wasn't it?").unwrap();

        assert_eq!(tokens, vec!["good", "movie", "wasn't", "it"]);
    }

    #[test]
    fn test_custom_pattern() {
        let tokenizer = SimpleTokenizer::with_pattern(r"[a-z]+").unwrap();
        let tokens = tokenizer.tokenize("ab1cd").unwrap();

        assert_eq!(tokens, vec!["ab", "cd"]);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(SimpleTokenizer::with_pattern("[unclosed").is_err());
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(SimpleTokenizer::new().name(), "simple");
    }
}
