//! Output formatting for CLI commands.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::cli::args::{KazsearchArgs, OutputFormat};
use crate::error::Result;
use crate::index::segment::IndexStats;
use crate::message::indexer::IndexingSummary;
use crate::message::search::TermCounts;

/// Result of the `index` command.
#[derive(Debug, Serialize)]
pub struct IndexOutput {
    pub path: String,
    pub append: bool,
    #[serde(flatten)]
    pub summary: IndexingSummary,
}

impl IndexOutput {
    pub fn new(path: &Path, append: bool, summary: IndexingSummary) -> Self {
        IndexOutput {
            path: path.display().to_string(),
            append,
            summary,
        }
    }
}

impl fmt::Display for IndexOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.append { "appended" } else { "indexed" };
        writeln!(f, "{} {} messages into {}", mode, self.summary.indexed, self.path)?;
        for warning in &self.summary.warnings {
            writeln!(
                f,
                "warning: message {}: {} {:?} ({}), stored as 0",
                warning.position, warning.field, warning.value, warning.reason
            )?;
        }
        Ok(())
    }
}

/// Result of the `stats` command.
#[derive(Debug, Serialize)]
pub struct StatsOutput {
    #[serde(flatten)]
    pub stats: IndexStats,
    pub term_counts: TermCounts,
}

impl fmt::Display for StatsOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analyzer: {}", self.stats.analyzer)?;
        writeln!(
            f,
            "Documents: {} live, {} deleted",
            self.stats.live_doc_count, self.stats.deleted_count
        )?;
        for field in &self.stats.fields {
            writeln!(
                f,
                "  {}: {} unique terms, {} term/document pairs, {} tokens",
                field.field, field.unique_terms, field.sum_doc_freq, field.sum_total_term_freq
            )?;
        }
        if !self.stats.numeric_fields.is_empty() {
            writeln!(f, "Numeric fields: {}", self.stats.numeric_fields.join(", "))?;
        }
        writeln!(f, "Body: {}", self.term_counts.body)?;
        writeln!(f, "Title: {}", self.term_counts.title)?;
        writeln!(f, "Total count terms: {}", self.term_counts.total)
    }
}

/// Render `result` in the requested format.
pub fn render<T: Serialize + fmt::Display>(result: &T, args: &KazsearchArgs) -> Result<String> {
    Ok(match args.output_format {
        OutputFormat::Human => result.to_string(),
        OutputFormat::Json if args.pretty => serde_json::to_string_pretty(result)? + "\n",
        OutputFormat::Json => serde_json::to_string(result)? + "\n",
    })
}

/// Print `result` to stdout in the requested format.
pub fn output_result<T: Serialize + fmt::Display>(result: &T, args: &KazsearchArgs) -> Result<()> {
    print!("{}", render(result, args)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(format: &str) -> KazsearchArgs {
        KazsearchArgs::try_parse_from(["kazsearch", "--format", format, "stats", "/tmp/idx"])
            .unwrap()
    }

    fn output() -> IndexOutput {
        IndexOutput::new(
            Path::new("/tmp/idx"),
            false,
            IndexingSummary {
                indexed: 2,
                doc_ids: vec![0, 1],
                warnings: Vec::new(),
            },
        )
    }

    #[test]
    fn test_human_output() {
        let text = render(&output(), &args("human")).unwrap();

        assert_eq!(text, "indexed 2 messages into /tmp/idx\n");
    }

    #[test]
    fn test_json_output() {
        let text = render(&output(), &args("json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["indexed"], 2);
        assert_eq!(value["path"], "/tmp/idx");
        assert_eq!(value["doc_ids"], serde_json::json!([0, 1]));
    }
}
