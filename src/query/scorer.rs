//! Relevance scoring.
//!
//! A term's contribution to a document's score is `tf * idf` with
//! `idf = ln(1 + N / df)`, where `N` is the number of live documents that
//! have the field and `df` the number that contain the term. Scores rise
//! with term frequency and with term rarity; a document matching more query
//! terms collects more contributions.

use std::fmt::Debug;

/// Trait for per-term scoring functions.
pub trait Scorer: Send + Sync + Debug {
    /// Inverse document frequency of a term found in `doc_freq` of
    /// `doc_count` documents.
    fn idf(&self, doc_freq: u64, doc_count: u64) -> f32;

    /// Score contribution of a term occurring `term_freq` times.
    fn score(&self, term_freq: u32, idf: f32) -> f32;

    /// Get the name of this scorer.
    fn name(&self) -> &'static str;
}

/// Classic tf·idf.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfScorer;

impl TfIdfScorer {
    /// Create a new tf·idf scorer.
    pub fn new() -> Self {
        TfIdfScorer
    }
}

impl Scorer for TfIdfScorer {
    fn idf(&self, doc_freq: u64, doc_count: u64) -> f32 {
        if doc_freq == 0 {
            return 0.0;
        }
        (1.0 + doc_count as f64 / doc_freq as f64).ln() as f32
    }

    fn score(&self, term_freq: u32, idf: f32) -> f32 {
        term_freq as f32 * idf
    }

    fn name(&self) -> &'static str {
        "tf_idf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idf_decreases_with_doc_freq() {
        let scorer = TfIdfScorer::new();

        let rare = scorer.idf(1, 100);
        let common = scorer.idf(50, 100);
        let everywhere = scorer.idf(100, 100);

        assert!(rare > common);
        assert!(common > everywhere);
        assert!((everywhere - 2f32.ln()).abs() < 1e-6);
        assert_eq!(scorer.idf(0, 100), 0.0);
    }

    #[test]
    fn test_score_increases_with_tf() {
        let scorer = TfIdfScorer::new();
        let idf = scorer.idf(2, 10);

        assert!(scorer.score(2, idf) > scorer.score(1, idf));
        assert_eq!(scorer.score(0, idf), 0.0);
    }
}
