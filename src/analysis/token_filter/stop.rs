//! Stop word removal.

use std::sync::Arc;

use ahash::AHashSet;

use crate::analysis::token::Token;
use crate::analysis::token_filter::TokenFilter;

/// Drops tokens whose text is in a word set. Matching is exact.
#[derive(Clone, Debug, Default)]
pub struct StopFilter {
    words: Arc<AHashSet<String>>,
}

impl StopFilter {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopFilter {
            words: Arc::new(words.into_iter().map(Into::into).collect()),
        }
    }

    /// Union of several word lists.
    pub fn from_lists(lists: &[&[&str]]) -> Self {
        Self::from_words(lists.iter().flat_map(|list| list.iter().copied()))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl TokenFilter for StopFilter {
    fn apply(&self, mut tokens: Vec<Token>) -> Vec<Token> {
        tokens.retain(|token| !self.words.contains(&token.text));
        tokens
    }

    fn name(&self) -> &str {
        "stop"
    }
}
