//! The analyzer contract.
//!
//! ```text
//! text -> tokenizer -> filter 1 -> ... -> filter N -> terms
//! ```
//!
//! The same analyzer runs at index time and at query time, so a query word
//! and an indexed word meet as the same term.
//!
//! ```
//! use kazsearch::analysis::analyzer::AnalyzerKind;
//! use kazsearch::analysis::analyzer::analyzer::Analyzer;
//!
//! let analyzer = AnalyzerKind::Russian.build().unwrap();
//! assert_eq!(analyzer.tokenize("Тима и Алия").unwrap(), vec!["тима", "алия"]);
//! ```

use crate::analysis::token::Token;
use crate::error::Result;

/// Turns text into terms. Shared between indexing threads and readers.
pub trait Analyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<Vec<Token>>;

    fn name(&self) -> &str;

    /// Term texts in order. Deterministic; empty text gives no terms.
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .analyze(text)?
            .into_iter()
            .map(|token| token.text)
            .collect())
    }
}
