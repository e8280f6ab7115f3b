//! More-like-this query: find documents similar to a piece of text.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::debug;

use crate::error::{KazsearchError, Result};
use crate::query::boolean::BooleanQuery;
use crate::query::candidates::Candidates;
use crate::query::query::{Query, Queryable};
use crate::query::term::TermQuery;
use crate::search::searcher::IndexSearcher;

/// Default minimum frequency of a term in the like text.
pub const DEFAULT_MIN_TERM_FREQ: u32 = 1;
/// Default minimum number of documents a term must occur in.
pub const DEFAULT_MIN_DOC_FREQ: u64 = 1;
/// Default maximum number of terms in the rewritten query.
pub const DEFAULT_MAX_QUERY_TERMS: usize = 25;

/// Documents sharing the most significant terms of `like_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoreLikeThisQuery {
    like_text: String,
    fields: Vec<String>,
    min_term_freq: u32,
    min_doc_freq: u64,
    max_query_terms: usize,
}

impl MoreLikeThisQuery {
    /// Look for documents like `like_text` in `fields`, with the default
    /// frequency cut-offs and term cap.
    pub fn new<T, I, S>(like_text: T, fields: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MoreLikeThisQuery {
            like_text: like_text.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            min_term_freq: DEFAULT_MIN_TERM_FREQ,
            min_doc_freq: DEFAULT_MIN_DOC_FREQ,
            max_query_terms: DEFAULT_MAX_QUERY_TERMS,
        }
    }

    /// Ignore terms occurring fewer times in `like_text`.
    pub fn with_min_term_freq(mut self, min_term_freq: u32) -> Self {
        self.min_term_freq = min_term_freq;
        self
    }

    /// Ignore terms found in fewer documents of every like-field.
    pub fn with_min_doc_freq(mut self, min_doc_freq: u64) -> Self {
        self.min_doc_freq = min_doc_freq;
        self
    }

    /// Keep at most this many interesting terms.
    pub fn with_max_query_terms(mut self, max_query_terms: usize) -> Self {
        self.max_query_terms = max_query_terms;
        self
    }

    pub fn like_text(&self) -> &str {
        &self.like_text
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn max_query_terms(&self) -> usize {
        self.max_query_terms
    }

    /// The selected terms with their weights, strongest first.
    pub fn interesting_terms(&self, searcher: &IndexSearcher) -> Result<Vec<(String, f32)>> {
        if self.fields.is_empty() {
            return Err(KazsearchError::invalid_argument(
                "more-like-this query needs at least one field",
            ));
        }

        let mut freqs: BTreeMap<String, u32> = BTreeMap::new();
        for term in searcher.analyzer().tokenize(&self.like_text)? {
            *freqs.entry(term).or_insert(0) += 1;
        }

        let segment = searcher.segment();
        let scorer = searcher.scorer();
        let mut weighted: Vec<(String, f32)> = Vec::new();
        for (term, tf) in freqs {
            if tf < self.min_term_freq {
                continue;
            }
            let best = self
                .fields
                .iter()
                .filter_map(|field| {
                    let df = segment.doc_freq(field, &term);
                    (df >= self.min_doc_freq.max(1))
                        .then(|| scorer.idf(df, segment.field_doc_count(field)))
                })
                .fold(None, |acc: Option<f32>, idf| Some(acc.map_or(idf, |a| a.max(idf))));
            if let Some(idf) = best {
                weighted.push((term, scorer.score(tf, idf)));
            }
        }

        weighted.sort_by(|a, b| match b.1.total_cmp(&a.1) {
            Ordering::Equal => a.0.cmp(&b.0),
            other => other,
        });
        weighted.truncate(self.max_query_terms);
        Ok(weighted)
    }

    /// Expand into a boolean query of SHOULD term clauses.
    pub fn rewrite(&self, searcher: &IndexSearcher) -> Result<Query> {
        let terms = self.interesting_terms(searcher)?;
        debug!("more-like-this selected {} terms", terms.len());

        let mut query = BooleanQuery::new();
        for (term, _) in &terms {
            for field in &self.fields {
                query.add_should(TermQuery::new(field.as_str(), term.as_str()).into());
            }
        }
        Ok(query.into())
    }

    pub fn evaluate(&self, searcher: &IndexSearcher) -> Result<Candidates> {
        let rewritten = self.rewrite(searcher)?;
        searcher.evaluate(&rewritten)
    }
}
