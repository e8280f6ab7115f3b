//! Numeric range query implementation.

use crate::error::Result;
use crate::query::candidates::Candidates;
use crate::search::searcher::IndexSearcher;

/// Matches documents whose integer field value lies within bounds.
///
/// A missing bound is open. Every match scores 1.0. A lower bound above the
/// upper bound matches nothing; it is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericRangeQuery {
    field: String,
    lower: Option<i64>,
    upper: Option<i64>,
    include_lower: bool,
    include_upper: bool,
}

impl NumericRangeQuery {
    /// Create a range query with explicit bounds and inclusivity.
    pub fn new<S: Into<String>>(
        field: S,
        lower: Option<i64>,
        upper: Option<i64>,
        include_lower: bool,
        include_upper: bool,
    ) -> Self {
        NumericRangeQuery {
            field: field.into(),
            lower,
            upper,
            include_lower,
            include_upper,
        }
    }

    /// `[lower, upper]`.
    pub fn between<S: Into<String>>(field: S, lower: i64, upper: i64) -> Self {
        Self::new(field, Some(lower), Some(upper), true, true)
    }

    /// `[lower, *]`.
    pub fn at_least<S: Into<String>>(field: S, lower: i64) -> Self {
        Self::new(field, Some(lower), None, true, true)
    }

    /// `[*, upper]`.
    pub fn at_most<S: Into<String>>(field: S, upper: i64) -> Self {
        Self::new(field, None, Some(upper), true, true)
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the lower bound.
    pub fn lower(&self) -> Option<i64> {
        self.lower
    }

    /// Get the upper bound.
    pub fn upper(&self) -> Option<i64> {
        self.upper
    }

    /// Whether the lower bound is inclusive.
    pub fn include_lower(&self) -> bool {
        self.include_lower
    }

    /// Whether the upper bound is inclusive.
    pub fn include_upper(&self) -> bool {
        self.include_upper
    }

    /// Check if a value lies within the range.
    pub fn contains(&self, value: i64) -> bool {
        let above = match self.lower {
            Some(lower) if self.include_lower => value >= lower,
            Some(lower) => value > lower,
            None => true,
        };
        let below = match self.upper {
            Some(upper) if self.include_upper => value <= upper,
            Some(upper) => value < upper,
            None => true,
        };
        above && below
    }

    /// Check if no value can lie within the range.
    pub fn is_empty_range(&self) -> bool {
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => {
                lower > upper || (lower == upper && !(self.include_lower && self.include_upper))
            }
            _ => false,
        }
    }

    /// Every live document with a value in range, scored 1.0.
    pub fn evaluate(&self, searcher: &IndexSearcher) -> Result<Candidates> {
        if self.is_empty_range() {
            return Ok(Candidates::new());
        }

        let segment = searcher.segment();
        let mut entries: Vec<(u64, f32)> = Vec::new();
        for &(doc_id, value) in segment.numeric_values(&self.field) {
            if entries.last().is_some_and(|&(last, _)| last == doc_id) {
                continue;
            }
            if segment.is_live(doc_id) && self.contains(value) {
                entries.push((doc_id, 1.0));
            }
        }

        Ok(Candidates::from_sorted(entries))
    }
}
