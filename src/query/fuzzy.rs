//! Fuzzy query implementation for approximate string matching.

use std::collections::BTreeMap;

use log::debug;

use crate::error::Result;
use crate::index::config::{DEFAULT_FUZZY_MAX_EDITS, DEFAULT_FUZZY_MAX_EXPANSIONS};
use crate::index::posting::DocId;
use crate::query::candidates::Candidates;
use crate::query::term::TermQuery;
use crate::search::searcher::IndexSearcher;
use crate::util::levenshtein::LevenshteinMatcher;

/// A fuzzy query for approximate string matching.
///
/// Expands to every indexed term of the field within `max_edits` plain
/// Levenshtein edits of the query term, closest first, up to
/// `max_expansions` terms. A document's score is the best over its matching
/// expansions of `tf * idf / (1 + distance)`, so with `max_edits == 0` the
/// query scores exactly like a [`TermQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyQuery {
    field: String,
    term: String,
    max_edits: usize,
    prefix_length: usize,
    max_expansions: usize,
}

impl FuzzyQuery {
    /// Create a new fuzzy query with default settings.
    pub fn new<F: Into<String>, T: Into<String>>(field: F, term: T) -> Self {
        FuzzyQuery {
            field: field.into(),
            term: term.into(),
            max_edits: DEFAULT_FUZZY_MAX_EDITS,
            prefix_length: 0,
            max_expansions: DEFAULT_FUZZY_MAX_EXPANSIONS,
        }
    }

    /// Set the maximum edit distance.
    pub fn with_max_edits(mut self, max_edits: usize) -> Self {
        self.max_edits = max_edits;
        self
    }

    /// Set the number of leading characters that must match exactly.
    pub fn with_prefix_length(mut self, prefix_length: usize) -> Self {
        self.prefix_length = prefix_length;
        self
    }

    /// Set the maximum number of expanded terms.
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the query term.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Get the maximum edit distance.
    pub fn max_edits(&self) -> usize {
        self.max_edits
    }

    /// Get the exact prefix length.
    pub fn prefix_length(&self) -> usize {
        self.prefix_length
    }

    /// Get the maximum number of expansions.
    pub fn max_expansions(&self) -> usize {
        self.max_expansions
    }

    /// Indexed terms within reach, as `(distance, term)`, closest first.
    pub fn expand(&self, searcher: &IndexSearcher) -> Vec<(usize, String)> {
        let Some(field) = searcher.segment().field(&self.field) else {
            return Vec::new();
        };

        let matcher = LevenshteinMatcher::new(&self.term, self.prefix_length);
        let prefix = matcher.prefix();
        let mut expansions: Vec<(usize, String)> = field
            .terms_with_prefix(&prefix)
            .filter_map(|(term, _)| {
                matcher
                    .distance(term, self.max_edits)
                    .map(|d| (d, term.to_string()))
            })
            .collect();

        expansions.sort();
        expansions.truncate(self.max_expansions);
        expansions
    }

    /// Union of the expansions' postings, weighted by closeness.
    pub fn evaluate(&self, searcher: &IndexSearcher) -> Result<Candidates> {
        let expansions = self.expand(searcher);
        debug!(
            "fuzzy {}:{}~{} expanded to {} terms",
            self.field,
            self.term,
            self.max_edits,
            expansions.len()
        );

        let mut scores: BTreeMap<DocId, f32> = BTreeMap::new();
        for (distance, term) in expansions {
            let weight = 1.0 / (1.0 + distance as f32);
            let matched = TermQuery::new(self.field.as_str(), term).evaluate(searcher)?;
            for (doc_id, score) in matched.iter() {
                let weighted = score * weight;
                let best = scores.entry(doc_id).or_insert(weighted);
                if weighted > *best {
                    *best = weighted;
                }
            }
        }

        Ok(Candidates::from_map(scores))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::document::Document;
    use crate::index::config::IndexConfig;
    use crate::index::index::Index;

    fn index() -> Index {
        let index = Index::in_memory(IndexConfig::default()).unwrap();
        let docs = ["корреспондент сообщает", "дорога домой", "дороги закрыты", "корреспондент"]
            .iter()
            .map(|t| Document::builder().add_text("body", *t).build())
            .collect();
        index.index(true, docs).unwrap();
        index
    }

    #[test]
    fn test_misspelling_is_found() {
        let index = index();
        let searcher = index.reader().unwrap();

        let result = FuzzyQuery::new("body", "кореспондент")
            .evaluate(&searcher)
            .unwrap();

        assert_eq!(result.doc_ids(), vec![0, 3]);
    }

    #[test]
    fn test_closer_terms_score_higher() {
        let index = index();
        let searcher = index.reader().unwrap();

        let result = FuzzyQuery::new("body", "дорога").evaluate(&searcher).unwrap();

        assert_eq!(result.doc_ids(), vec![1, 2]);
        assert!(result.score(1).unwrap() > result.score(2).unwrap());
    }

    #[test]
    fn test_zero_edits_equals_term_query() {
        let index = index();
        let searcher = index.reader().unwrap();

        let fuzzy = FuzzyQuery::new("body", "корреспондент")
            .with_max_edits(0)
            .evaluate(&searcher)
            .unwrap();
        let exact = TermQuery::new("body", "корреспондент")
            .evaluate(&searcher)
            .unwrap();

        assert_eq!(fuzzy, exact);
    }

    #[test]
    fn test_prefix_and_expansion_limits() {
        let index = index();
        let searcher = index.reader().unwrap();

        let prefixed = FuzzyQuery::new("body", "xорога").with_prefix_length(1);
        assert!(prefixed.expand(&searcher).is_empty());

        let limited = FuzzyQuery::new("body", "дорога").with_max_expansions(1);
        assert_eq!(limited.expand(&searcher), vec![(0, "дорога".to_string())]);
    }
}
