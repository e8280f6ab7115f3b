//! Ready-made searches over a message index.
//!
//! Every method takes explicit parameters and returns ranked
//! [`SearchResults`]; nothing is printed. Free text is analyzed with the
//! analyzer the index was written with.

use serde::{Deserialize, Serialize};

use crate::error::{KazsearchError, Result};
use crate::index::index::Index;
use crate::message::model::{BODY, CREATION_DATE, REGION, TITLE};
use crate::query::SearchResults;
use crate::query::boolean::BooleanQuery;
use crate::query::constant_score::ConstantScoreQuery;
use crate::query::fuzzy::FuzzyQuery;
use crate::query::more_like_this::MoreLikeThisQuery;
use crate::query::parser::QueryParser;
use crate::query::query::Query;
use crate::query::range::NumericRangeQuery;
use crate::query::term::TermQuery;
use crate::search::searcher::IndexSearcher;

/// Restriction on the creation date of a message, in epoch seconds.
///
/// All bounds are inclusive. `Between` with `from > to` matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFilter {
    #[default]
    Any,
    Before(i64),
    After(i64),
    Between(i64, i64),
}

impl DateFilter {
    /// The range query for this filter; `None` for [`DateFilter::Any`].
    pub fn to_query(self) -> Option<Query> {
        let range = match self {
            DateFilter::Any => return None,
            DateFilter::Before(date) => NumericRangeQuery::at_most(CREATION_DATE, date),
            DateFilter::After(date) => NumericRangeQuery::at_least(CREATION_DATE, date),
            DateFilter::Between(from, to) => NumericRangeQuery::between(CREATION_DATE, from, to),
        };
        Some(range.into())
    }
}

/// Term statistics of the `body` and `title` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermCounts {
    /// `(term, document)` pairs in `body`.
    pub body: u64,
    /// `(term, document)` pairs in `title`.
    pub title: u64,
    pub total: u64,
}

/// Searches over one snapshot of a message index.
#[derive(Debug, Clone)]
pub struct MessageSearch {
    searcher: IndexSearcher,
    fuzzy_max_edits: usize,
    fuzzy_max_expansions: usize,
}

impl MessageSearch {
    pub fn new(searcher: IndexSearcher) -> Self {
        MessageSearch {
            searcher,
            fuzzy_max_edits: crate::index::config::DEFAULT_FUZZY_MAX_EDITS,
            fuzzy_max_expansions: crate::index::config::DEFAULT_FUZZY_MAX_EXPANSIONS,
        }
    }

    /// Snapshot the current content of `index`.
    pub fn open(index: &Index) -> Result<Self> {
        let config = index.config();
        Ok(MessageSearch {
            searcher: index.reader()?,
            fuzzy_max_edits: config.fuzzy_max_edits,
            fuzzy_max_expansions: config.fuzzy_max_expansions,
        })
    }

    pub fn searcher(&self) -> &IndexSearcher {
        &self.searcher
    }

    pub fn default_limit(&self) -> usize {
        self.searcher.default_limit()
    }

    /// Run any query.
    pub fn execute(&self, query: &Query, limit: usize) -> Result<SearchResults> {
        self.searcher.search(query, limit)
    }

    /// Exact term lookup in `field`.
    ///
    /// The text is normalized with the index analyzer first; if it yields
    /// several terms, all of them are required.
    pub fn search_with_term_query(
        &self,
        text: &str,
        field: &str,
        limit: usize,
    ) -> Result<SearchResults> {
        let mut terms = self.searcher.analyzer().tokenize(text)?;
        let query: Query = match terms.len() {
            0 => BooleanQuery::new().into(),
            1 => TermQuery::new(field, terms.remove(0)).into(),
            _ => {
                let mut query = BooleanQuery::new();
                for term in terms {
                    query.add_must(TermQuery::new(field, term).into());
                }
                query.into()
            }
        };
        self.execute(&query, limit)
    }

    /// Term lookup in `body` with the default limit.
    pub fn search_term_in_body(&self, text: &str) -> Result<SearchResults> {
        self.search_with_term_query(text, BODY, self.default_limit())
    }

    /// Term statistics of `body` and `title`.
    pub fn count_terms(&self) -> TermCounts {
        let segment = self.searcher.segment();
        let body = segment.sum_doc_freq(BODY);
        let title = segment.sum_doc_freq(TITLE);
        TermCounts {
            body,
            title,
            total: body + title,
        }
    }

    /// Query-syntax search in `body`.
    pub fn search_in_body(&self, query: &str, limit: usize) -> Result<SearchResults> {
        let query = self.parser(&[BODY]).parse(query)?;
        self.execute(&query, limit)
    }

    /// Query-syntax search in `body` and `title`.
    pub fn search_in_multi_field(&self, query: &str, limit: usize) -> Result<SearchResults> {
        let query = self.parser(&[BODY, TITLE]).parse(query)?;
        self.execute(&query, limit)
    }

    /// Messages created at or before `date`.
    pub fn search_by_before_date(&self, date: i64, limit: usize) -> Result<SearchResults> {
        self.search_by_date(DateFilter::Before(date), limit)
    }

    /// Messages created at or after `date`.
    pub fn search_by_after_date(&self, date: i64, limit: usize) -> Result<SearchResults> {
        self.search_by_date(DateFilter::After(date), limit)
    }

    /// Messages created within `[from, to]`.
    pub fn search_by_range_date(&self, from: i64, to: i64, limit: usize) -> Result<SearchResults> {
        self.search_by_date(DateFilter::Between(from, to), limit)
    }

    fn search_by_date(&self, filter: DateFilter, limit: usize) -> Result<SearchResults> {
        let query = filter.to_query().unwrap_or_else(|| {
            NumericRangeQuery::new(CREATION_DATE, None, None, true, true).into()
        });
        self.execute(&query, limit)
    }

    /// Messages from any of `regions` whose title matches `title_query`,
    /// all scored 1.0.
    pub fn search_in_region<S: AsRef<str>>(
        &self,
        regions: &[S],
        title_query: &str,
        limit: usize,
    ) -> Result<SearchResults> {
        let mut query = BooleanQuery::new();
        query.add_must(self.region_query(regions)?);
        query.add_must(self.parser(&[TITLE]).parse(title_query)?);

        self.execute(&ConstantScoreQuery::new(query.into()).into(), limit)
    }

    /// Messages matching `text` in `body` or `title`, from any of
    /// `regions`, within `dates`, all scored 1.0.
    pub fn search_by_many_queries<S: AsRef<str>>(
        &self,
        text: &str,
        regions: &[S],
        dates: DateFilter,
        limit: usize,
    ) -> Result<SearchResults> {
        let mut query = BooleanQuery::new();
        query.add_must(self.region_query(regions)?);
        query.add_must(self.parser(&[BODY, TITLE]).parse(text)?);
        if let Some(range) = dates.to_query() {
            query.add_must(range);
        }

        self.execute(&ConstantScoreQuery::new(query.into()).into(), limit)
    }

    /// Messages similar to `like_text` in `fields`.
    pub fn more_like_this<S: AsRef<str>>(
        &self,
        like_text: &str,
        fields: &[S],
        limit: usize,
    ) -> Result<SearchResults> {
        let query = MoreLikeThisQuery::new(like_text, fields.iter().map(|f| f.as_ref()));
        self.execute(&query.into(), limit)
    }

    /// Fuzzy search in `field` with the configured edit distance.
    ///
    /// Each analyzed term of `text` is matched fuzzily; any of them may
    /// match.
    pub fn fuzzy_search(&self, text: &str, field: &str, limit: usize) -> Result<SearchResults> {
        let mut queries: Vec<Query> = self
            .searcher
            .analyzer()
            .tokenize(text)?
            .into_iter()
            .map(|term| {
                FuzzyQuery::new(field, term)
                    .with_max_edits(self.fuzzy_max_edits)
                    .with_max_expansions(self.fuzzy_max_expansions)
                    .into()
            })
            .collect();

        let query = if queries.len() == 1 {
            queries.remove(0)
        } else {
            let mut group = BooleanQuery::new();
            for query in queries {
                group.add_should(query);
            }
            group.into()
        };
        self.execute(&query, limit)
    }

    /// Fuzzy search in `body` with the default limit.
    pub fn fuzzy_search_in_body(&self, text: &str) -> Result<SearchResults> {
        self.fuzzy_search(text, BODY, self.default_limit())
    }

    fn parser(&self, fields: &[&str]) -> QueryParser {
        QueryParser::new(fields.iter().copied(), self.searcher.analyzer().clone())
    }

    /// One SHOULD clause per region. A region code that analyzes into
    /// several terms (`ALMATY_REGION`) requires all of them, so it never
    /// matches another code sharing one term.
    fn region_query<S: AsRef<str>>(&self, regions: &[S]) -> Result<Query> {
        if regions.is_empty() {
            return Err(KazsearchError::invalid_argument(
                "at least one region is required",
            ));
        }

        let analyzer = self.searcher.analyzer();
        let mut query = BooleanQuery::new();
        for region in regions {
            let mut terms = analyzer.tokenize(region.as_ref())?;
            match terms.len() {
                0 => {}
                1 => query.add_should(TermQuery::new(REGION, terms.remove(0)).into()),
                _ => {
                    let mut group = BooleanQuery::new();
                    for term in terms {
                        group.add_must(TermQuery::new(REGION, term).into());
                    }
                    query.add_should(group.into());
                }
            }
        }
        Ok(query.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::config::IndexConfig;
    use crate::message::indexer::MessageIndexer;
    use crate::message::model::{Message, parse_creation_date};

    fn indexer() -> MessageIndexer {
        let indexer = MessageIndexer::in_memory(IndexConfig::default()).unwrap();
        let messages = vec![
            Message::new(
                "Тима приехал",
                "Наш корреспондент сообщает: дорога была долгой",
                ["Астана"],
                "Feb 1, 2016 10:00:00 AM",
            ),
            Message::new(
                "Тима уехал",
                "Дороги замело снегом",
                ["ALMATY_REGION"],
                "Feb 10, 2016 08:30:00 PM",
            ),
            Message::new(
                "Погода",
                "Снег в Астане",
                ["Астана"],
                "Feb 5, 2016 09:00:00 AM",
            ),
        ];
        indexer.index(true, &messages).unwrap();
        indexer
    }

    fn date(raw: &str) -> i64 {
        parse_creation_date(raw).unwrap()
    }

    #[test]
    fn test_term_query_is_normalized() {
        let search = indexer().read_index().unwrap();

        let results = search.search_with_term_query("Тима", TITLE, 10).unwrap();

        assert_eq!(results.doc_ids(), vec![0, 1]);
        assert!(search.search_term_in_body("тима").unwrap().is_empty());
    }

    #[test]
    fn test_count_terms() {
        let search = indexer().read_index().unwrap();

        let counts = search.count_terms();

        assert_eq!(counts.title, 5);
        assert_eq!(counts.total, counts.body + counts.title);
    }

    #[test]
    fn test_query_syntax_searches() {
        let search = indexer().read_index().unwrap();

        assert_eq!(
            search.search_in_body("корреспондент", 10).unwrap().doc_ids(),
            vec![0]
        );
        assert_eq!(
            search.search_in_multi_field("тима -уехал", 10).unwrap().doc_ids(),
            vec![0]
        );
        assert!(search.search_in_body("(тима", 10).is_err());
    }

    #[test]
    fn test_date_searches() {
        let search = indexer().read_index().unwrap();
        let feb5 = date("Feb 5, 2016 09:00:00 AM");

        assert_eq!(
            search.search_by_before_date(feb5, 10).unwrap().doc_ids(),
            vec![0, 2]
        );
        assert_eq!(
            search.search_by_after_date(feb5, 10).unwrap().doc_ids(),
            vec![1, 2]
        );
        assert_eq!(
            search
                .search_by_range_date(
                    date("Feb 2, 2016 12:00:00 AM"),
                    date("Feb 6, 2016 12:00:00 AM"),
                    10
                )
                .unwrap()
                .doc_ids(),
            vec![2]
        );
        assert!(search.search_by_range_date(feb5, 0, 10).unwrap().is_empty());
    }

    #[test]
    fn test_region_search() {
        let search = indexer().read_index().unwrap();

        let results = search.search_in_region(&["Астана"], "Тима", 10).unwrap();
        assert_eq!(results.doc_ids(), vec![0]);
        assert_eq!(results.hits[0].score, 1.0);

        let both = search
            .search_in_region(&["Астана", "ALMATY_REGION"], "Тима", 10)
            .unwrap();
        assert_eq!(both.doc_ids(), vec![0, 1]);

        let none: [&str; 0] = [];
        assert!(matches!(
            search.search_in_region(&none, "Тима", 10),
            Err(KazsearchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_region_codes_do_not_share_terms() {
        let indexer = MessageIndexer::in_memory(IndexConfig::default()).unwrap();
        let messages = vec![
            Message::new("Тима дома", "", ["ALMATY_REGION"], "Feb 1, 2016 10:00:00 AM"),
            Message::new("Тима в гостях", "", ["KARAGANDA_REGION"], "Feb 2, 2016 10:00:00 AM"),
        ];
        indexer.index(true, &messages).unwrap();
        let search = indexer.read_index().unwrap();

        let almaty = search.search_in_region(&["ALMATY_REGION"], "Тима", 10).unwrap();
        let combined = search
            .search_by_many_queries("Тима", &["ALMATY_REGION"], DateFilter::Any, 10)
            .unwrap();
        let both = search
            .search_in_region(&["ALMATY_REGION", "KARAGANDA_REGION"], "Тима", 10)
            .unwrap();

        assert_eq!(almaty.doc_ids(), vec![0]);
        assert_eq!(combined.doc_ids(), vec![0]);
        assert_eq!(both.doc_ids(), vec![0, 1]);
    }

    #[test]
    fn test_search_by_many_queries() {
        let search = indexer().read_index().unwrap();
        let regions = ["Астана", "ALMATY_REGION"];
        let feb5 = date("Feb 5, 2016 09:00:00 AM");

        let before = search
            .search_by_many_queries("Тима", &regions, DateFilter::Before(feb5), 10)
            .unwrap();
        let after = search
            .search_by_many_queries("Тима", &regions, DateFilter::After(feb5), 10)
            .unwrap();
        let any = search
            .search_by_many_queries("Тима", &regions, DateFilter::Any, 10)
            .unwrap();

        assert_eq!(before.doc_ids(), vec![0]);
        assert_eq!(after.doc_ids(), vec![1]);
        assert_eq!(any.doc_ids(), vec![0, 1]);
        assert!(any.hits.iter().all(|hit| hit.score == 1.0));
    }

    #[test]
    fn test_fuzzy_search_with_typo() {
        let search = indexer().read_index().unwrap();

        let typo = search.search_in_body("кореспондент", 10).unwrap();
        let fuzzy = search.fuzzy_search_in_body("кореспондент").unwrap();

        assert!(typo.is_empty());
        assert_eq!(fuzzy.doc_ids(), vec![0]);
        assert_eq!(
            search.fuzzy_search("дорога", BODY, 10).unwrap().doc_ids(),
            vec![0, 1]
        );
    }

    #[test]
    fn test_more_like_this() {
        let search = indexer().read_index().unwrap();

        let results = search.more_like_this("Тима", &[TITLE, BODY], 10).unwrap();

        assert_eq!(results.doc_ids(), vec![0, 1]);
    }
}
