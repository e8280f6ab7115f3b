//! Token filters rewrite or drop the tokens a tokenizer produced.
//!
//! Filters run in the order an analyzer lists them. Stop lists hold
//! lowercase words, so a [`stop::StopFilter`] goes after the
//! [`lowercase::LowercaseFilter`].

use crate::analysis::token::Token;

pub trait TokenFilter: Send + Sync {
    fn apply(&self, tokens: Vec<Token>) -> Vec<Token>;

    fn name(&self) -> &str;
}

pub mod lowercase;
pub mod stop;
