//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::dataset::TokenSequence;
use crate::error::Result;

/// A tokenizer that splits text on whitespace.
///
/// Tokens are kept verbatim: no lowercasing, no punctuation stripping.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenSequence> {
        Ok(text.split_whitespace().map(str::to_string).collect())
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
