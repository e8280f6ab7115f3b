//! Rendering of search results.
//!
//! [`ResultPresenter::present`] is a pure function from results to a
//! [`SearchReport`]; the caller decides whether to print it, serialize it, or
//! inspect it.

use std::fmt;

use chrono::DateTime;
use serde::Serialize;

use crate::document::field::FieldValue;
use crate::index::posting::DocId;
use crate::query::SearchResults;

/// Human-readable date format for epoch-second fields.
pub const DISPLAY_DATE_FORMAT: &str = "%b %d, %Y %I:%M:%S %p";

/// One hit, rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedHit {
    pub doc_id: DocId,
    pub score: f32,
    /// `(field, rendered value)` in display order; absent fields are skipped.
    pub fields: Vec<(String, String)>,
}

/// What a search produced, ready to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchReport {
    /// Nothing matched.
    NoResults,
    /// At least one document matched.
    Hits {
        total_hits: u64,
        hits: Vec<RenderedHit>,
    },
}

impl SearchReport {
    pub fn is_empty(&self) -> bool {
        matches!(self, SearchReport::NoResults)
    }
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchReport::NoResults => writeln!(f, "No results found."),
            SearchReport::Hits { total_hits, hits } => {
                writeln!(f, "Found {total_hits} matching documents, showing {}:", hits.len())?;
                for hit in hits {
                    writeln!(f, "doc {} (score {:.4})", hit.doc_id, hit.score)?;
                    for (name, value) in &hit.fields {
                        writeln!(f, "  {name}: {value}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Selects and formats stored fields of search hits.
#[derive(Debug, Clone)]
pub struct ResultPresenter {
    display_fields: Vec<String>,
    date_fields: Vec<String>,
}

impl ResultPresenter {
    pub fn new<I, S>(display_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ResultPresenter {
            display_fields: display_fields.into_iter().map(Into::into).collect(),
            date_fields: Vec::new(),
        }
    }

    /// Render these integer fields as UTC dates as well as raw seconds.
    pub fn with_date_fields<I, S>(mut self, date_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_fields = date_fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn display_fields(&self) -> &[String] {
        &self.display_fields
    }

    pub fn present(&self, results: &SearchResults) -> SearchReport {
        if results.is_empty() {
            return SearchReport::NoResults;
        }

        let hits = results
            .hits
            .iter()
            .map(|hit| RenderedHit {
                doc_id: hit.doc_id,
                score: hit.score,
                fields: self
                    .display_fields
                    .iter()
                    .filter_map(|name| {
                        hit.fields
                            .get(name)
                            .map(|value| (name.clone(), self.render(name, value)))
                    })
                    .collect(),
            })
            .collect();

        SearchReport::Hits {
            total_hits: results.total_hits,
            hits,
        }
    }

    fn render(&self, name: &str, value: &FieldValue) -> String {
        match value {
            FieldValue::Integer(secs) if self.date_fields.iter().any(|f| f == name) => {
                match DateTime::from_timestamp(*secs, 0) {
                    Some(date) => format!("{} ({secs})", date.format(DISPLAY_DATE_FORMAT)),
                    None => secs.to_string(),
                }
            }
            other => other.to_string(),
        }
    }
}
