//! Query parser for converting query strings to structured queries.
//!
//! Supported syntax:
//! - Bare words: `тима` (SHOULD in the default fields)
//! - Required and prohibited words: `+тима -дорога`
//! - Field-specific words: `title:тима`, `region:(астана OR almaty)`
//! - Boolean operators: `тима AND приехал`, `тима OR алия`, `NOT дорога`
//! - Grouping: `(тима OR алия) AND приехал`
//! - Fuzzy words: `дорога~1` (`дорога~` means two edits)
//!
//! Every word is run through the analyzer, so stop words vanish and case is
//! folded. A word that analyzes to several terms (`ALMATY_REGION`) becomes a
//! SHOULD group, and with several default fields each term is looked up in
//! all of them.

use std::iter::Peekable;
use std::str::Chars;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::error::{KazsearchError, Result};
use crate::index::config::DEFAULT_FUZZY_MAX_EDITS;
use crate::query::boolean::{BooleanClause, BooleanQuery, Occur};
use crate::query::fuzzy::FuzzyQuery;
use crate::query::query::Query;
use crate::query::term::TermQuery;

/// Parses query strings against one or more default fields.
pub struct QueryParser {
    default_fields: Vec<String>,
    analyzer: Arc<dyn Analyzer>,
}

impl QueryParser {
    /// Create a new query parser.
    pub fn new<I, S>(default_fields: I, analyzer: Arc<dyn Analyzer>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryParser {
            default_fields: default_fields.into_iter().map(Into::into).collect(),
            analyzer,
        }
    }

    /// Get the default fields.
    pub fn default_fields(&self) -> &[String] {
        &self.default_fields
    }

    /// Parse a query string into a query.
    ///
    /// Empty input, unbalanced parentheses, quoted phrases, a dangling
    /// operator or a malformed `~N` are `Query` errors. Input made only of
    /// stop words parses to an empty boolean query, which matches nothing.
    pub fn parse(&self, query_str: &str) -> Result<Query> {
        if query_str.trim().is_empty() {
            return Err(KazsearchError::parse("empty query string"));
        }

        let mut parser = QueryStringParser {
            chars: query_str.chars().peekable(),
            parser: self,
        };
        let clauses = parser.parse_clauses(None, false)?;
        Ok(combine(clauses))
    }

    fn word_query(
        &self,
        field: Option<&str>,
        word: &str,
        fuzzy: Option<usize>,
    ) -> Result<Option<Query>> {
        let fields: Vec<&str> = match field {
            Some(field) => vec![field],
            None => self.default_fields.iter().map(String::as_str).collect(),
        };
        if fields.is_empty() {
            return Err(KazsearchError::query(format!(
                "no field given for '{word}' and no default field configured"
            )));
        }

        let mut queries: Vec<Query> = Vec::new();
        for term in self.analyzer.tokenize(word)? {
            for field in &fields {
                queries.push(match fuzzy {
                    Some(edits) => FuzzyQuery::new(*field, term.as_str())
                        .with_max_edits(edits)
                        .into(),
                    None => TermQuery::new(*field, term.as_str()).into(),
                });
            }
        }

        Ok(match queries.len() {
            0 => None,
            1 => queries.pop(),
            _ => {
                let mut group = BooleanQuery::new();
                for query in queries {
                    group.add_should(query);
                }
                Some(group.into())
            }
        })
    }
}

impl std::fmt::Debug for QueryParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryParser")
            .field("default_fields", &self.default_fields)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conjunction {
    None,
    And,
    Or,
}

/// Internal recursive-descent parser over one query string.
struct QueryStringParser<'a> {
    chars: Peekable<Chars<'a>>,
    parser: &'a QueryParser,
}

impl QueryStringParser<'_> {
    fn parse_clauses(&mut self, field: Option<&str>, nested: bool) -> Result<Vec<BooleanClause>> {
        let mut clauses: Vec<BooleanClause> = Vec::new();

        loop {
            self.skip_whitespace();
            match self.chars.peek().copied() {
                None if nested => {
                    return Err(KazsearchError::parse("unbalanced parenthesis: missing ')'"));
                }
                None => break,
                Some(')') if nested => {
                    self.chars.next();
                    break;
                }
                Some(')') => {
                    return Err(KazsearchError::parse("unbalanced parenthesis: unexpected ')'"));
                }
                _ => {}
            }

            let conjunction = match self.peek_keyword() {
                Some("AND") => Conjunction::And,
                Some("OR") => Conjunction::Or,
                _ => Conjunction::None,
            };
            if conjunction != Conjunction::None {
                if clauses.is_empty() {
                    return Err(KazsearchError::parse(
                        "boolean operator without a left operand",
                    ));
                }
                self.consume_keyword();
            }

            let modifier = self.parse_modifier();
            self.skip_whitespace();
            if matches!(self.chars.peek().copied(), None | Some(')')) {
                return Err(KazsearchError::parse("operator without an operand"));
            }

            let Some(query) = self.parse_primary(field)? else {
                continue;
            };

            if conjunction == Conjunction::And {
                if let Some(last) = clauses.last_mut() {
                    if last.occur == Occur::Should {
                        last.occur = Occur::Must;
                    }
                }
            }

            let occur = match (modifier, conjunction) {
                (Some(occur), _) => occur,
                (None, Conjunction::And) => Occur::Must,
                (None, _) => Occur::Should,
            };
            clauses.push(BooleanClause::new(query, occur));
        }

        Ok(clauses)
    }

    fn parse_modifier(&mut self) -> Option<Occur> {
        self.skip_whitespace();
        match self.chars.peek().copied() {
            Some('+') => {
                self.chars.next();
                Some(Occur::Must)
            }
            Some('-') => {
                self.chars.next();
                Some(Occur::MustNot)
            }
            _ if self.peek_keyword() == Some("NOT") => {
                self.consume_keyword();
                Some(Occur::MustNot)
            }
            _ => None,
        }
    }

    fn parse_primary(&mut self, field: Option<&str>) -> Result<Option<Query>> {
        match self.chars.peek().copied() {
            Some('(') => {
                self.chars.next();
                let clauses = self.parse_clauses(field, true)?;
                return Ok(group(clauses));
            }
            Some('"') => {
                return Err(KazsearchError::parse("phrase queries are not supported"));
            }
            _ => {}
        }

        let word = self.consume_word()?;

        if self.chars.peek() == Some(&':') {
            self.chars.next();
            if field.is_some() {
                return Err(KazsearchError::parse(format!(
                    "nested field '{word}' inside a field group"
                )));
            }
            return match self.chars.peek().copied() {
                Some('(') => {
                    self.chars.next();
                    let clauses = self.parse_clauses(Some(word.as_str()), true)?;
                    Ok(group(clauses))
                }
                Some('"') => Err(KazsearchError::parse("phrase queries are not supported")),
                _ => {
                    let term = self.consume_word()?;
                    let fuzzy = self.parse_fuzzy()?;
                    self.parser.word_query(Some(word.as_str()), &term, fuzzy)
                }
            };
        }

        let fuzzy = self.parse_fuzzy()?;
        self.parser.word_query(field, &word, fuzzy)
    }

    fn parse_fuzzy(&mut self) -> Result<Option<usize>> {
        if self.chars.peek() != Some(&'~') {
            return Ok(None);
        }
        self.chars.next();

        let mut digits = String::new();
        while let Some(ch) = self.chars.peek().copied() {
            if is_terminator(ch) {
                break;
            }
            digits.push(ch);
            self.chars.next();
        }

        if digits.is_empty() {
            return Ok(Some(DEFAULT_FUZZY_MAX_EDITS));
        }
        digits
            .parse::<usize>()
            .map(Some)
            .map_err(|_| KazsearchError::parse(format!("invalid fuzzy edit distance '~{digits}'")))
    }

    fn consume_word(&mut self) -> Result<String> {
        let mut word = String::new();
        while let Some(ch) = self.chars.peek().copied() {
            if is_terminator(ch) || ch == ':' || ch == '~' {
                break;
            }
            word.push(ch);
            self.chars.next();
        }

        if word.is_empty() {
            let found = self
                .chars
                .peek()
                .map_or("end of input".to_string(), |c| format!("'{c}'"));
            Err(KazsearchError::parse(format!("expected a word but found {found}")))
        } else {
            Ok(word)
        }
    }

    fn peek_keyword(&mut self) -> Option<&'static str> {
        let word: String = self
            .chars
            .clone()
            .take_while(|ch| !is_terminator(*ch))
            .collect();
        match word.as_str() {
            "AND" => Some("AND"),
            "OR" => Some("OR"),
            "NOT" => Some("NOT"),
            _ => None,
        }
    }

    fn consume_keyword(&mut self) {
        while let Some(ch) = self.chars.peek() {
            if is_terminator(*ch) {
                break;
            }
            self.chars.next();
        }
        self.skip_whitespace();
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }
    }
}

fn is_terminator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '(' | ')' | '"')
}

/// A parenthesized group; `None` if every word in it was a stop word.
fn group(clauses: Vec<BooleanClause>) -> Option<Query> {
    if clauses.is_empty() {
        None
    } else {
        Some(combine(clauses))
    }
}

/// A single SHOULD or MUST clause stands for itself.
fn combine(mut clauses: Vec<BooleanClause>) -> Query {
    if clauses.len() == 1 && clauses[0].occur != Occur::MustNot {
        if let Some(clause) = clauses.pop() {
            return clause.query;
        }
    }

    let mut query = BooleanQuery::new();
    for clause in clauses {
        query.add_clause(clause);
    }
    query.into()
}
