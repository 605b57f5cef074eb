//! Unicode word tokenizer implementation.

use unicode_segmentation::UnicodeSegmentation;

use super::Tokenizer;

use crate::dataset::TokenSequence;
use crate::error::Result;

/// A tokenizer that splits text on Unicode word boundaries (UAX #29).
///
/// Non-word segments like punctuation and whitespace are filtered out and
/// the remaining words are lowercased.
#[derive(Clone, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    /// Create a new Unicode word tokenizer.
    pub fn new() -> Self {
        UnicodeWordTokenizer
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenSequence> {
        Ok(text
            .unicode_words()
            .map(|word| word.to_lowercase())
            .collect())
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}
