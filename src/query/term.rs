//! Term query implementation.

use crate::error::Result;
use crate::query::candidates::Candidates;
use crate::search::searcher::IndexSearcher;

/// A query that matches one exact term in one field.
///
/// The term is looked up as given; it is not analyzed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermQuery {
    field: String,
    term: String,
}

impl TermQuery {
    /// Create a new term query.
    pub fn new<F: Into<String>, T: Into<String>>(field: F, term: T) -> Self {
        TermQuery {
            field: field.into(),
            term: term.into(),
        }
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the term.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Every live document containing the term, scored `tf * idf`.
    pub fn evaluate(&self, searcher: &IndexSearcher) -> Result<Candidates> {
        let segment = searcher.segment();
        let Some(postings) = segment.postings(&self.field, &self.term) else {
            return Ok(Candidates::new());
        };

        let scorer = searcher.scorer();
        let idf = scorer.idf(
            segment.doc_freq(&self.field, &self.term),
            segment.field_doc_count(&self.field),
        );

        let entries = postings
            .iter()
            .filter(|p| segment.is_live(p.doc_id) && p.frequency > 0)
            .map(|p| (p.doc_id, scorer.score(p.frequency, idf)))
            .collect();

        Ok(Candidates::from_sorted(entries))
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
        let docs = ["дорога домой", "дорога дорога", "домой"]
            .iter()
            .map(|t| Document::builder().add_text("body", *t).build())
            .collect();
        index.index(true, docs).unwrap();
        index
    }

    #[test]
    fn test_term_query_matches_postings() {
        let index = index();
        let searcher = index.reader().unwrap();

        let candidates = TermQuery::new("body", "дорога").evaluate(&searcher).unwrap();

        assert_eq!(candidates.doc_ids(), vec![0, 1]);
        assert!(candidates.score(1).unwrap() > candidates.score(0).unwrap());
    }

    #[test]
    fn test_term_is_not_analyzed() {
        let index = index();
        let searcher = index.reader().unwrap();

        assert!(TermQuery::new("body", "Дорога")
            .evaluate(&searcher)
            .unwrap()
            .is_empty());
        assert!(TermQuery::new("title", "дорога")
            .evaluate(&searcher)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_deleted_documents_excluded() {
        let index = index();
        index.delete_document(1).unwrap();
        let searcher = index.reader().unwrap();

        let candidates = TermQuery::new("body", "дорога").evaluate(&searcher).unwrap();

        assert_eq!(candidates.doc_ids(), vec![0]);
    }
}
