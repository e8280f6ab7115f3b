//! Pattern-driven tokenizer.

use regex::Regex;

use crate::analysis::token::Token;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{KazsearchError, Result};

/// Runs of Unicode letters and digits. Everything else is a separator, so
/// `ALMATY_REGION` yields two tokens.
pub const DEFAULT_PATTERN: &str = r"[\p{L}\p{N}]+";

/// Emits every non-empty match of a pattern as a token.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    pattern: Regex,
}

impl RegexTokenizer {
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_PATTERN)
    }

    /// Build a tokenizer for `pattern`. Patterns that can match the empty
    /// string are rejected since they would produce empty terms.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| KazsearchError::analysis(format!("bad token pattern: {e}")))?;
        if pattern.is_match("") {
            return Err(KazsearchError::analysis(format!(
                "token pattern '{}' matches the empty string",
                pattern.as_str()
            )));
        }
        Ok(RegexTokenizer { pattern })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        self.pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, found)| Token::new(found.as_str(), position, found.range()))
            .collect()
    }

    fn name(&self) -> &str {
        "regex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: Vec<Token>) -> Vec<String> {
        tokens.into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_offsets_and_positions() {
        let tokens = RegexTokenizer::new().unwrap().tokenize("Тима приехал");

        assert_eq!(tokens[0], Token::new("Тима", 0, 0..8));
        assert_eq!(tokens[1], Token::new("приехал", 1, 9..23));
    }

    #[test]
    fn test_splits_on_non_alphanumeric() {
        let tokens = RegexTokenizer::new()
            .unwrap()
            .tokenize("Тима приехал в Астану, 2016-02-01! ALMATY_REGION");

        assert_eq!(
            texts(tokens),
            vec!["Тима", "приехал", "в", "Астану", "2016", "02", "01", "ALMATY", "REGION"]
        );
    }

    #[test]
    fn test_separator_only_input() {
        let tokenizer = RegexTokenizer::new().unwrap();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize(" ,.;!? --").is_empty());
    }

    #[test]
    fn test_custom_pattern() {
        let tokenizer = RegexTokenizer::with_pattern(r"\S+").unwrap();
        assert_eq!(
            texts(tokenizer.tokenize("ALMATY_REGION  Astana")),
            vec!["ALMATY_REGION", "Astana"]
        );
    }

    #[test]
    fn test_rejected_patterns() {
        assert!(RegexTokenizer::with_pattern("[unclosed").is_err());
        assert!(RegexTokenizer::with_pattern(r"\w*").is_err());
    }
}
