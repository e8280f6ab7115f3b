//! Searcher implementation for executing queries against a segment.

use std::sync::Arc;

use log::debug;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::error::{KazsearchError, Result};
use crate::index::config::{DEFAULT_LIMIT, IndexConfig};
use crate::index::posting::DocId;
use crate::index::segment::{Segment, StoredFields};
use crate::query::candidates::Candidates;
use crate::query::collector::{Collector, CountCollector, TopDocsCollector};
use crate::query::query::{Query, Queryable};
use crate::query::scorer::{Scorer, TfIdfScorer};
use crate::query::{SearchHit, SearchResults};

/// A read-only view over one committed segment.
///
/// Cloning is cheap and every clone sees the same snapshot, so searchers can
/// be handed to other threads freely.
#[derive(Clone)]
pub struct IndexSearcher {
    segment: Arc<Segment>,
    analyzer: Arc<dyn Analyzer>,
    scorer: Arc<dyn Scorer>,
    default_limit: usize,
}

impl IndexSearcher {
    /// Create a searcher using the segment's own analyzer and tf·idf.
    pub fn new(segment: Arc<Segment>) -> Result<Self> {
        let analyzer = segment.analyzer_kind().build()?;
        Ok(IndexSearcher {
            segment,
            analyzer,
            scorer: Arc::new(TfIdfScorer::new()),
            default_limit: DEFAULT_LIMIT,
        })
    }

    /// Create a searcher taking its defaults from `config`.
    pub fn with_config(segment: Arc<Segment>, config: &IndexConfig) -> Result<Self> {
        let mut searcher = Self::new(segment)?;
        searcher.default_limit = config.default_limit;
        Ok(searcher)
    }

    /// Replace the scoring function.
    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// The segment being searched.
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// The analyzer the segment was written with.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// The scoring function.
    pub fn scorer(&self) -> &dyn Scorer {
        self.scorer.as_ref()
    }

    /// The limit used when callers do not give one.
    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Evaluate `query` and return the best `limit` hits.
    ///
    /// Hits are ordered by score descending, ties by ascending id. A limit
    /// of 0 is rejected with `InvalidArgument`.
    pub fn search(&self, query: &Query, limit: usize) -> Result<SearchResults> {
        if limit == 0 {
            return Err(KazsearchError::invalid_argument(
                "result limit must be positive",
            ));
        }

        let candidates = self.evaluate(query)?;
        let mut collector = TopDocsCollector::new(limit);
        for (doc_id, score) in candidates.iter() {
            collector.collect(doc_id, score);
        }
        let total_hits = collector.total_hits();

        let hits = collector
            .into_sorted()
            .into_iter()
            .map(|(doc_id, score)| {
                Ok(SearchHit {
                    doc_id,
                    score,
                    fields: self.stored_fields(doc_id)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let max_score = hits.first().map_or(0.0, |hit| hit.score);

        Ok(SearchResults {
            hits,
            total_hits,
            max_score,
        })
    }

    /// Number of documents matching `query`.
    pub fn count(&self, query: &Query) -> Result<u64> {
        let mut collector = CountCollector::new();
        for (doc_id, score) in self.evaluate(query)?.iter() {
            collector.collect(doc_id, score);
        }
        Ok(collector.total_hits())
    }

    /// Stored fields of a live document.
    pub fn stored_fields(&self, doc_id: DocId) -> Result<StoredFields> {
        self.segment.stored_fields(doc_id).cloned()
    }
}

impl Queryable for IndexSearcher {
    fn evaluate(&self, query: &Query) -> Result<Candidates> {
        let candidates = match query {
            Query::Term(q) => q.evaluate(self),
            Query::Boolean(q) => q.evaluate(self),
            Query::NumericRange(q) => q.evaluate(self),
            Query::Fuzzy(q) => q.evaluate(self),
            Query::MultiFieldOr(q) => q.evaluate(self),
            Query::ConstantScore(q) => q.evaluate(self),
            Query::MoreLikeThis(q) => q.evaluate(self),
        }?;
        debug!("{query} matched {} documents", candidates.len());
        Ok(candidates)
    }
}

impl std::fmt::Debug for IndexSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexSearcher")
            .field("doc_count", &self.segment.doc_count())
            .field("analyzer", &self.analyzer.name())
            .field("scorer", &self.scorer.name())
            .field("default_limit", &self.default_limit)
            .finish()
    }
}
