//! Constant score query.

use crate::error::Result;
use crate::query::candidates::Candidates;
use crate::query::query::{Query, Queryable};
use crate::search::searcher::IndexSearcher;

/// Matches what the wrapped query matches, with one fixed score.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantScoreQuery {
    query: Box<Query>,
    score: f32,
}

impl ConstantScoreQuery {
    /// Wrap `query` with a score of 1.0.
    pub fn new(query: Query) -> Self {
        ConstantScoreQuery {
            query: Box::new(query),
            score: 1.0,
        }
    }

    /// Use a different constant score.
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    /// The wrapped query.
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// The constant score.
    pub fn score(&self) -> f32 {
        self.score
    }

    /// Evaluate the wrapped query and flatten every score to the constant.
    pub fn evaluate(&self, searcher: &IndexSearcher) -> Result<Candidates> {
        Ok(searcher
            .evaluate(&self.query)?
            .with_constant_score(self.score))
    }
}
