//! Multi-field query: analyzed text OR-ed across several fields.

use std::collections::BTreeSet;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::error::{KazsearchError, Result};
use crate::query::boolean::BooleanQuery;
use crate::query::candidates::Candidates;
use crate::query::query::{Query, Queryable};
use crate::query::term::TermQuery;
use crate::search::searcher::IndexSearcher;

/// Free text matched against several fields at once.
///
/// The text is analyzed with the searcher's analyzer and every resulting
/// term is looked up in every field; a document matches if any
/// `(field, term)` pair matches, and scores add up across pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiFieldQuery {
    fields: Vec<String>,
    text: String,
}

impl MultiFieldQuery {
    /// Create a new multi-field query.
    pub fn new<I, S, T>(fields: I, text: T) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        T: Into<String>,
    {
        MultiFieldQuery {
            fields: fields.into_iter().map(Into::into).collect(),
            text: text.into(),
        }
    }

    /// Fields searched.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The raw query text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Expand into a boolean query of SHOULD term clauses.
    pub fn rewrite(&self, analyzer: &dyn Analyzer) -> Result<Query> {
        if self.fields.is_empty() {
            return Err(KazsearchError::invalid_argument(
                "multi-field query needs at least one field",
            ));
        }

        let mut seen = BTreeSet::new();
        let mut query = BooleanQuery::new();
        for term in analyzer.tokenize(&self.text)? {
            if !seen.insert(term.clone()) {
                continue;
            }
            for field in &self.fields {
                query.add_should(TermQuery::new(field.as_str(), term.as_str()).into());
            }
        }

        Ok(query.into())
    }

    /// Evaluate the rewritten query.
    pub fn evaluate(&self, searcher: &IndexSearcher) -> Result<Candidates> {
        let rewritten = self.rewrite(searcher.analyzer().as_ref())?;
        searcher.evaluate(&rewritten)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::AnalyzerKind;
    use crate::document::document::Document;
    use crate::index::config::IndexConfig;
    use crate::index::index::Index;

    fn index() -> Index {
        let index = Index::in_memory(IndexConfig::default()).unwrap();
        let docs = vec![
            Document::builder()
                .add_text("title", "Тима приехал")
                .add_text("body", "дорога была долгой")
                .build(),
            Document::builder()
                .add_text("title", "Новости")
                .add_text("body", "Тима уехал")
                .build(),
            Document::builder()
                .add_text("title", "Погода")
                .add_text("body", "снег")
                .build(),
        ];
        index.index(true, docs).unwrap();
        index
    }

    #[test]
    fn test_rewrite_deduplicates_terms() {
        let analyzer = AnalyzerKind::Russian.build().unwrap();
        let query = MultiFieldQuery::new(["title", "body"], "Тима тима дорога");

        let Query::Boolean(rewritten) = query.rewrite(analyzer.as_ref()).unwrap() else {
            panic!("expected a boolean query");
        };

        assert_eq!(rewritten.clauses().len(), 4);
    }

    #[test]
    fn test_matches_any_field() {
        let index = index();
        let searcher = index.reader().unwrap();

        let result = MultiFieldQuery::new(["title", "body"], "ТИМА")
            .evaluate(&searcher)
            .unwrap();

        assert_eq!(result.doc_ids(), vec![0, 1]);
    }

    #[test]
    fn test_scores_add_across_pairs() {
        let index = index();
        let searcher = index.reader().unwrap();

        let result = MultiFieldQuery::new(["title", "body"], "тима дорога")
            .evaluate(&searcher)
            .unwrap();

        assert!(result.score(0).unwrap() > result.score(1).unwrap());
    }

    #[test]
    fn test_empty_fields_rejected() {
        let index = index();
        let searcher = index.reader().unwrap();

        let err = MultiFieldQuery::new(Vec::<String>::new(), "тима")
            .evaluate(&searcher)
            .unwrap_err();

        assert!(matches!(err, KazsearchError::InvalidArgument(_)));
    }
}
