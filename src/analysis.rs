//! Text analysis module for kazsearch.
//!
//! This module turns raw field text into the normalized terms stored in the
//! inverted index: a tokenizer splits the text, then token filters lowercase
//! it and drop stop words.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
