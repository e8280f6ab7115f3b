use crate::analysis::token::Token;
use crate::analysis::token_filter::TokenFilter;

/// Full Unicode lowercasing; Cyrillic (Kazakh letters included) and Latin
/// normalise alike.
#[derive(Clone, Copy, Debug, Default)]
pub struct LowercaseFilter;

impl TokenFilter for LowercaseFilter {
    fn apply(&self, mut tokens: Vec<Token>) -> Vec<Token> {
        for token in &mut tokens {
            if token.text.chars().any(char::is_uppercase) {
                token.text = token.text.to_lowercase();
            }
        }
        tokens
    }

    fn name(&self) -> &str {
        "lowercase"
    }
}
