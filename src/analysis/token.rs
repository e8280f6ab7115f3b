//! The unit of text analysis.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// One term candidate cut out of a field value.
///
/// `position` counts tokens as the tokenizer emitted them and is not
/// renumbered when a filter drops a token, so gaps mark removed stop words.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub position: usize,
    /// Byte range of the token in the analysed text.
    pub offsets: Range<usize>,
}

impl Token {
    pub fn new<S: Into<String>>(text: S, position: usize, offsets: Range<usize>) -> Self {
        Token {
            text: text.into(),
            position,
            offsets,
        }
    }

    /// A token with no source location, handy when building streams by hand.
    pub fn detached<S: Into<String>>(text: S, position: usize) -> Self {
        Self::new(text, position, 0..0)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_text() {
        let token = Token::new("Тима", 0, 0..8);
        assert_eq!(token.to_string(), "Тима");
        assert_eq!(token.offsets.len(), 8);
    }

    #[test]
    fn test_detached_has_empty_range() {
        let token = Token::detached("астана", 3);
        assert_eq!(token.position, 3);
        assert!(token.offsets.is_empty());
    }
}
