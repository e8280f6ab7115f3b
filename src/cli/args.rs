//! Command line argument parsing for the kazsearch CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// kazsearch - full-text search over Kazakh and Russian news messages
#[derive(Parser, Debug, Clone)]
#[command(name = "kazsearch")]
#[command(about = "Index JSON news messages and search them")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct KazsearchArgs {
    /// Verbosity level (repeat for more: -v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl KazsearchArgs {
    /// Get the effective verbosity level (0 = quiet, 1 = normal).
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Index a JSON (or JSON lines) file of messages
    Index(IndexArgs),

    /// Search an index
    Search(SearchArgs),

    /// Show index statistics
    Stats(StatsArgs),
}

/// Arguments for indexing messages
#[derive(Args, Debug, Clone)]
pub struct IndexArgs {
    /// Path to the index directory
    #[arg(value_name = "INDEX_DIR")]
    pub index_path: PathBuf,

    /// Messages file (JSON array or JSON lines)
    #[arg(value_name = "MESSAGES_JSON")]
    pub messages_file: PathBuf,

    /// Add to the existing index instead of replacing it
    #[arg(short, long)]
    pub append: bool,

    /// Index configuration file (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for searching
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Path to the index directory
    #[arg(value_name = "INDEX_DIR")]
    pub index_path: PathBuf,

    /// Maximum number of results (default from the configuration)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Index configuration file (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Kind of search
    #[command(subcommand)]
    pub kind: SearchKind,
}

/// Search kinds available in the CLI.
///
/// Dates are epoch seconds or message dates such as "Feb 7, 2016 7:53:22 PM".
#[derive(Subcommand, Debug, Clone)]
pub enum SearchKind {
    /// Exact (normalized) term in one field
    Term {
        text: String,
        #[arg(long, default_value = "body")]
        field: String,
    },
    /// Query syntax in the body
    Parse { query: String },
    /// Query syntax in body and title
    Multi { query: String },
    /// Approximate match in one field
    Fuzzy {
        text: String,
        #[arg(long, default_value = "body")]
        field: String,
    },
    /// Messages created at or before a date
    Before { date: String },
    /// Messages created at or after a date
    After { date: String },
    /// Messages created between two dates
    Range { from: String, to: String },
    /// Title query restricted to regions
    Region {
        title: String,
        #[arg(short, long = "region", required = true)]
        regions: Vec<String>,
    },
    /// Text in body or title, restricted to regions and dates
    Combined {
        text: String,
        #[arg(short, long = "region", required = true)]
        regions: Vec<String>,
        #[arg(long)]
        before: Option<String>,
        #[arg(long)]
        after: Option<String>,
    },
    /// Messages similar to a text
    Mlt {
        text: String,
        #[arg(long, value_delimiter = ',', default_value = "title,body")]
        fields: Vec<String>,
    },
}

/// Arguments for index statistics
#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the index directory
    #[arg(value_name = "INDEX_DIR")]
    pub index_path: PathBuf,

    /// Index configuration file (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_command() {
        let args = KazsearchArgs::try_parse_from([
            "kazsearch",
            "index",
            "/tmp/idx",
            "messages.json",
            "--append",
        ])
        .unwrap();

        let Command::Index(index_args) = args.command else {
            panic!("expected index command");
        };
        assert_eq!(index_args.index_path, PathBuf::from("/tmp/idx"));
        assert!(index_args.append);
        assert!(index_args.config.is_none());
    }

    #[test]
    fn test_search_command() {
        let args = KazsearchArgs::try_parse_from([
            "kazsearch",
            "--format",
            "json",
            "search",
            "/tmp/idx",
            "--limit",
            "5",
            "combined",
            "Тима",
            "-r",
            "Астана",
            "-r",
            "ALMATY_REGION",
            "--before",
            "1454874802",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        let Command::Search(search_args) = args.command else {
            panic!("expected search command");
        };
        assert_eq!(search_args.limit, Some(5));
        let SearchKind::Combined {
            text,
            regions,
            before,
            after,
        } = search_args.kind
        else {
            panic!("expected combined search");
        };
        assert_eq!(text, "Тима");
        assert_eq!(regions, vec!["Астана", "ALMATY_REGION"]);
        assert_eq!(before.as_deref(), Some("1454874802"));
        assert!(after.is_none());
    }

    #[test]
    fn test_region_requires_regions() {
        assert!(
            KazsearchArgs::try_parse_from(["kazsearch", "search", "/tmp/idx", "region", "Тима"])
                .is_err()
        );
    }

    #[test]
    fn test_mlt_default_fields() {
        let args = KazsearchArgs::try_parse_from(["kazsearch", "search", "/tmp/idx", "mlt", "Тима"])
            .unwrap();

        let Command::Search(SearchArgs {
            kind: SearchKind::Mlt { fields, .. },
            ..
        }) = args.command
        else {
            panic!("expected mlt search");
        };
        assert_eq!(fields, vec!["title", "body"]);
    }

    #[test]
    fn test_verbosity_levels() {
        let parse = |flag: &str| {
            KazsearchArgs::try_parse_from(["kazsearch", flag, "stats", "/tmp/idx"]).unwrap()
        };
        let quiet = parse("-q");
        let verbose = parse("-vv");

        assert_eq!(quiet.verbosity(), 0);
        assert_eq!(verbose.verbosity(), 3);
    }
}
