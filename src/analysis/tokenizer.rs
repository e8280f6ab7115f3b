//! Tokenizers split field text into tokens.
//!
//! ```
//! use kazsearch::analysis::tokenizer::Tokenizer;
//! use kazsearch::analysis::tokenizer::regex::RegexTokenizer;
//!
//! let tokenizer = RegexTokenizer::new().unwrap();
//! let words: Vec<_> = tokenizer.tokenize("Астана, 2016").into_iter().map(|t| t.text).collect();
//! assert_eq!(words, vec!["Астана", "2016"]);
//! ```

use crate::analysis::token::Token;

/// First stage of an analyzer.
///
/// Tokenizing never fails: malformed configuration is rejected when the
/// tokenizer is built, and any text (including empty text) yields a
/// possibly empty token list.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn name(&self) -> &str;
}

pub mod regex;
