//! Tokenizer implementations for text analysis.
//!
//! The classifier core treats tokens as opaque strings; everything about
//! how raw text becomes a [`TokenSequence`] lives behind the [`Tokenizer`]
//! trait so callers can inject their own.

use crate::dataset::TokenSequence;
use crate::error::Result;

/// Trait for tokenizers that convert raw text into token sequences.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into an ordered token sequence.
    fn tokenize(&self, text: &str) -> Result<TokenSequence>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

// Individual tokenizer modules
pub mod simple;
pub mod unicode_word;
pub mod whitespace;

// Re-export all tokenizers for convenient access
pub use simple::SimpleTokenizer;
pub use unicode_word::UnicodeWordTokenizer;
pub use whitespace::WhitespaceTokenizer;
