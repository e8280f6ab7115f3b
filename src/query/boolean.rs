//! Boolean query implementation.

use log::debug;

use crate::error::Result;
use crate::query::candidates::Candidates;
use crate::query::query::{Query, Queryable};
use crate::search::searcher::IndexSearcher;

/// How a clause participates in a boolean query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occur {
    /// The clause must match.
    Must,
    /// The clause should match. Without MUST clauses at least one SHOULD
    /// clause has to match; with them, SHOULD clauses only add score.
    Should,
    /// The clause must not match.
    MustNot,
}

/// A clause in a boolean query.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanClause {
    /// The sub-query.
    pub query: Query,
    /// How it occurs.
    pub occur: Occur,
}

impl BooleanClause {
    /// Create a new clause.
    pub fn new(query: Query, occur: Occur) -> Self {
        BooleanClause { query, occur }
    }

    /// Create a MUST clause.
    pub fn must(query: Query) -> Self {
        Self::new(query, Occur::Must)
    }

    /// Create a SHOULD clause.
    pub fn should(query: Query) -> Self {
        Self::new(query, Occur::Should)
    }

    /// Create a MUST_NOT clause.
    pub fn must_not(query: Query) -> Self {
        Self::new(query, Occur::MustNot)
    }
}

/// A query combining sub-queries with set semantics.
///
/// MUST clauses intersect, SHOULD clauses union, MUST_NOT clauses subtract.
/// The score of a document is the sum of the scores of its matching MUST and
/// SHOULD clauses. A query with only MUST_NOT clauses matches every live
/// document not excluded; a query with no clauses matches nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanQuery {
    clauses: Vec<BooleanClause>,
}

impl BooleanQuery {
    /// Create a new empty boolean query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause to the query.
    pub fn add_clause(&mut self, clause: BooleanClause) {
        self.clauses.push(clause);
    }

    /// Add a MUST clause.
    pub fn add_must(&mut self, query: Query) {
        self.add_clause(BooleanClause::must(query));
    }

    /// Add a SHOULD clause.
    pub fn add_should(&mut self, query: Query) {
        self.add_clause(BooleanClause::should(query));
    }

    /// Add a MUST_NOT clause.
    pub fn add_must_not(&mut self, query: Query) {
        self.add_clause(BooleanClause::must_not(query));
    }

    /// Get all clauses.
    pub fn clauses(&self) -> &[BooleanClause] {
        &self.clauses
    }

    /// Check if the query has no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Get clauses with a given occurrence.
    pub fn clauses_by_occur(&self, occur: Occur) -> Vec<&BooleanClause> {
        self.clauses.iter().filter(|c| c.occur == occur).collect()
    }

    /// Evaluate every clause and combine the candidate sets.
    pub fn evaluate(&self, searcher: &IndexSearcher) -> Result<Candidates> {
        let mut must: Option<Candidates> = None;
        let mut should: Option<Candidates> = None;
        let mut must_not = Candidates::new();
        let mut has_must_not = false;

        for clause in &self.clauses {
            let matched = searcher.evaluate(&clause.query)?;
            match clause.occur {
                Occur::Must => {
                    must = Some(match must {
                        Some(acc) => acc.intersect(&matched),
                        None => matched,
                    });
                }
                Occur::Should => {
                    should = Some(match should {
                        Some(acc) => acc.union(&matched),
                        None => matched,
                    });
                }
                Occur::MustNot => {
                    has_must_not = true;
                    must_not = must_not.union(&matched);
                }
            }
        }

        let included = match (must, should) {
            (Some(must), Some(should)) => must.add_scores(&should),
            (Some(must), None) => must,
            (None, Some(should)) => should,
            (None, None) if has_must_not => {
                debug!("pure negative boolean query, starting from all live documents");
                let segment = searcher.segment();
                Candidates::from_sorted(segment.live_doc_ids().map(|id| (id, 1.0)).collect())
            }
            (None, None) => Candidates::new(),
        };

        Ok(included.subtract(&must_not))
    }
}

/// Builder for boolean queries.
#[derive(Debug, Default)]
pub struct BooleanQueryBuilder {
    query: BooleanQuery,
}

impl BooleanQueryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a MUST clause.
    pub fn must(mut self, query: Query) -> Self {
        self.query.add_must(query);
        self
    }

    /// Add a SHOULD clause.
    pub fn should(mut self, query: Query) -> Self {
        self.query.add_should(query);
        self
    }

    /// Add a MUST_NOT clause.
    pub fn must_not(mut self, query: Query) -> Self {
        self.query.add_must_not(query);
        self
    }

    /// Build the boolean query.
    pub fn build(self) -> BooleanQuery {
        self.query
    }
}
