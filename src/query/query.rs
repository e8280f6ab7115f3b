//! The query sum type and the evaluation capability.

use std::fmt;

use crate::error::Result;
use crate::query::boolean::{BooleanQuery, Occur};
use crate::query::candidates::Candidates;
use crate::query::constant_score::ConstantScoreQuery;
use crate::query::fuzzy::FuzzyQuery;
use crate::query::more_like_this::MoreLikeThisQuery;
use crate::query::multi_field::MultiFieldQuery;
use crate::query::range::NumericRangeQuery;
use crate::query::term::TermQuery;

/// An immutable query.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Exact `(field, term)` lookup.
    Term(TermQuery),
    /// MUST / SHOULD / MUST_NOT combination of sub-queries.
    Boolean(BooleanQuery),
    /// Integer field within bounds.
    NumericRange(NumericRangeQuery),
    /// Terms within an edit distance.
    Fuzzy(FuzzyQuery),
    /// Analyzed text against several fields, OR-ed.
    MultiFieldOr(MultiFieldQuery),
    /// Sub-query matches with a fixed score.
    ConstantScore(ConstantScoreQuery),
    /// Documents similar to a piece of text.
    MoreLikeThis(MoreLikeThisQuery),
}

/// Something that can evaluate queries into candidate sets.
pub trait Queryable {
    /// Evaluate `query` without modifying the index.
    fn evaluate(&self, query: &Query) -> Result<Candidates>;
}

impl From<TermQuery> for Query {
    fn from(query: TermQuery) -> Self {
        Query::Term(query)
    }
}

impl From<BooleanQuery> for Query {
    fn from(query: BooleanQuery) -> Self {
        Query::Boolean(query)
    }
}

impl From<NumericRangeQuery> for Query {
    fn from(query: NumericRangeQuery) -> Self {
        Query::NumericRange(query)
    }
}

impl From<FuzzyQuery> for Query {
    fn from(query: FuzzyQuery) -> Self {
        Query::Fuzzy(query)
    }
}

impl From<MultiFieldQuery> for Query {
    fn from(query: MultiFieldQuery) -> Self {
        Query::MultiFieldOr(query)
    }
}

impl From<ConstantScoreQuery> for Query {
    fn from(query: ConstantScoreQuery) -> Self {
        Query::ConstantScore(query)
    }
}

impl From<MoreLikeThisQuery> for Query {
    fn from(query: MoreLikeThisQuery) -> Self {
        Query::MoreLikeThis(query)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Term(q) => write!(f, "{}:{}", q.field(), q.term()),
            Query::Boolean(q) => {
                f.write_str("(")?;
                for (i, clause) in q.clauses().iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    match clause.occur {
                        Occur::Must => f.write_str("+")?,
                        Occur::MustNot => f.write_str("-")?,
                        Occur::Should => {}
                    }
                    write!(f, "{}", clause.query)?;
                }
                f.write_str(")")
            }
            Query::NumericRange(q) => {
                let open = if q.include_lower() { '[' } else { '{' };
                let close = if q.include_upper() { ']' } else { '}' };
                let lower = q.lower().map_or("*".to_string(), |v| v.to_string());
                let upper = q.upper().map_or("*".to_string(), |v| v.to_string());
                write!(f, "{}:{open}{lower} TO {upper}{close}", q.field())
            }
            Query::Fuzzy(q) => write!(f, "{}:{}~{}", q.field(), q.term(), q.max_edits()),
            Query::MultiFieldOr(q) => write!(f, "[{}]:\"{}\"", q.fields().join(","), q.text()),
            Query::ConstantScore(q) => write!(f, "ConstantScore({})", q.query()),
            Query::MoreLikeThis(q) => {
                write!(f, "like:[{}]:\"{}\"", q.fields().join(","), q.like_text())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::boolean::BooleanQueryBuilder;

    #[test]
    fn test_display() {
        let query: Query = BooleanQueryBuilder::new()
            .must(TermQuery::new("title", "тима").into())
            .must_not(FuzzyQuery::new("body", "дорога").into())
            .should(NumericRangeQuery::at_most("creationDate", 5).into())
            .build()
            .into();

        assert_eq!(
            query.to_string(),
            "(+title:тима -body:дорога~2 creationDate:[* TO 5])"
        );
    }
}
