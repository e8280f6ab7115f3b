//! Command implementations for the kazsearch CLI.

use std::path::Path;

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{KazsearchError, Result};
use crate::index::config::IndexConfig;
use crate::message::indexer::MessageIndexer;
use crate::message::model::{BODY, CREATION_DATE, REGION, TITLE, parse_creation_date};
use crate::message::search::{DateFilter, MessageSearch};
use crate::query::SearchResults;
use crate::search::presenter::{ResultPresenter, SearchReport};

/// Execute a CLI command.
pub fn execute_command(args: KazsearchArgs) -> Result<()> {
    match &args.command {
        Command::Index(index_args) => index_messages(index_args, &args),
        Command::Search(search_args) => search_index(search_args, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &args),
    }
}

fn load_config(path: Option<&Path>) -> Result<IndexConfig> {
    match path {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            IndexConfig::from_file(path)
        }
        None => Ok(IndexConfig::default()),
    }
}

fn open_existing(index_path: &Path, config: Option<&Path>) -> Result<MessageIndexer> {
    if !index_path.is_dir() {
        return Err(KazsearchError::not_found(format!(
            "no index at {}",
            index_path.display()
        )));
    }
    MessageIndexer::open(index_path, load_config(config)?)
}

/// Index a messages file.
fn index_messages(args: &IndexArgs, cli_args: &KazsearchArgs) -> Result<()> {
    let indexer = MessageIndexer::open(&args.index_path, load_config(args.config.as_deref())?)?;
    let summary = indexer.index_file(!args.append, &args.messages_file)?;

    output_result(&IndexOutput::new(&args.index_path, args.append, summary), cli_args)
}

/// Run one of the message searches and print the report.
fn search_index(args: &SearchArgs, cli_args: &KazsearchArgs) -> Result<()> {
    let indexer = open_existing(&args.index_path, args.config.as_deref())?;
    let search = indexer.read_index()?;
    let limit = args.limit.unwrap_or_else(|| search.default_limit());

    let results = run_search(&search, &args.kind, limit)?;
    output_result(&present(&results), cli_args)
}

/// Dispatch a search kind to the matching message search.
pub fn run_search(
    search: &MessageSearch,
    kind: &SearchKind,
    limit: usize,
) -> Result<SearchResults> {
    match kind {
        SearchKind::Term { text, field } => search.search_with_term_query(text, field, limit),
        SearchKind::Parse { query } => search.search_in_body(query, limit),
        SearchKind::Multi { query } => search.search_in_multi_field(query, limit),
        SearchKind::Fuzzy { text, field } => search.fuzzy_search(text, field, limit),
        SearchKind::Before { date } => search.search_by_before_date(parse_date_arg(date)?, limit),
        SearchKind::After { date } => search.search_by_after_date(parse_date_arg(date)?, limit),
        SearchKind::Range { from, to } => {
            search.search_by_range_date(parse_date_arg(from)?, parse_date_arg(to)?, limit)
        }
        SearchKind::Region { title, regions } => search.search_in_region(regions, title, limit),
        SearchKind::Combined {
            text,
            regions,
            before,
            after,
        } => {
            let dates = date_filter(before.as_deref(), after.as_deref())?;
            search.search_by_many_queries(text, regions, dates, limit)
        }
        SearchKind::Mlt { text, fields } => search.more_like_this(text, fields, limit),
    }
}

/// Render results with the message display fields.
pub fn present(results: &SearchResults) -> SearchReport {
    ResultPresenter::new([TITLE, BODY, REGION, CREATION_DATE])
        .with_date_fields([CREATION_DATE])
        .present(results)
}

/// Epoch seconds, or a date in the message format.
pub fn parse_date_arg(raw: &str) -> Result<i64> {
    match raw.trim().parse::<i64>() {
        Ok(secs) => Ok(secs),
        Err(_) => parse_creation_date(raw),
    }
}

fn date_filter(before: Option<&str>, after: Option<&str>) -> Result<DateFilter> {
    Ok(match (after, before) {
        (Some(after), Some(before)) => {
            DateFilter::Between(parse_date_arg(after)?, parse_date_arg(before)?)
        }
        (Some(after), None) => DateFilter::After(parse_date_arg(after)?),
        (None, Some(before)) => DateFilter::Before(parse_date_arg(before)?),
        (None, None) => DateFilter::Any,
    })
}

/// Show index statistics.
fn show_stats(args: &StatsArgs, cli_args: &KazsearchArgs) -> Result<()> {
    let indexer = open_existing(&args.index_path, args.config.as_deref())?;
    let search = indexer.read_index()?;

    let output = StatsOutput {
        stats: indexer.index_handle().stats(),
        term_counts: search.count_terms(),
    };
    output_result(&output, cli_args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(parse_date_arg("1454874802").unwrap(), 1454874802);
        assert_eq!(parse_date_arg("Feb 7, 2016 7:53:22 PM").unwrap(), 1454874802);
        assert!(parse_date_arg("someday").is_err());
    }

    #[test]
    fn test_date_filter() {
        assert_eq!(date_filter(None, None).unwrap(), DateFilter::Any);
        assert_eq!(date_filter(Some("5"), None).unwrap(), DateFilter::Before(5));
        assert_eq!(date_filter(None, Some("5")).unwrap(), DateFilter::After(5));
        assert_eq!(
            date_filter(Some("9"), Some("5")).unwrap(),
            DateFilter::Between(5, 9)
        );
    }

    #[test]
    fn test_index_then_search() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("messages.json");
        std::fs::write(
            &input,
            r#"[{"title":"Тима приехал","body":"","region":["Астана"],"creationDate":"Feb 1, 2016 10:00:00 AM"}]"#,
        )
        .unwrap();
        let index_path = dir.path().join("index");

        let indexer = MessageIndexer::open(&index_path, IndexConfig::default()).unwrap();
        indexer.index_file(true, &input).unwrap();
        let search = open_existing(&index_path, None).unwrap().read_index().unwrap();

        let kind = SearchKind::Region {
            title: "Тима".to_string(),
            regions: vec!["Астана".to_string()],
        };
        let report = present(&run_search(&search, &kind, 10).unwrap());

        assert!(!report.is_empty());
        assert!(report.to_string().contains("title: Тима приехал"));
    }

    #[test]
    fn test_missing_index_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();

        let err = open_existing(&dir.path().join("missing"), None).unwrap_err();

        assert!(matches!(err, KazsearchError::NotFound(_)));
    }
}
