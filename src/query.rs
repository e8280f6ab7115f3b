//! Query system for searching documents.
//!
//! Queries are immutable values ([`query::Query`]) evaluated by a
//! [`query::Queryable`] engine into [`candidates::Candidates`]: documents
//! with partial scores, ordered by id. Ranking and truncation happen in the
//! [`collector`].

pub mod boolean;
pub mod candidates;
pub mod collector;
pub mod constant_score;
pub mod fuzzy;
pub mod more_like_this;
pub mod multi_field;
pub mod parser;
#[allow(clippy::module_inception)]
pub mod query;
pub mod range;
pub mod scorer;
pub mod term;

use serde::Serialize;

use crate::index::posting::DocId;
use crate::index::segment::StoredFields;

/// A search hit: a document, its score, and its stored fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// The document ID.
    pub doc_id: DocId,
    /// The relevance score.
    pub score: f32,
    /// The stored fields of the document.
    pub fields: StoredFields,
}

/// Search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    /// The search hits, best first.
    pub hits: Vec<SearchHit>,
    /// Total number of matching documents.
    pub total_hits: u64,
    /// Maximum score in the results.
    pub max_score: f32,
}

impl SearchResults {
    /// Results with no hits.
    pub fn empty() -> Self {
        SearchResults {
            hits: Vec::new(),
            total_hits: 0,
            max_score: 0.0,
        }
    }

    /// Check if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Document ids of the hits, best first.
    pub fn doc_ids(&self) -> Vec<DocId> {
        self.hits.iter().map(|hit| hit.doc_id).collect()
    }
}
