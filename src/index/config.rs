//! Index configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::AnalyzerKind;
use crate::error::{KazsearchError, Result};

/// Default number of hits returned when the caller does not say otherwise.
pub const DEFAULT_LIMIT: usize = 10;

/// Default maximum edit distance of fuzzy queries.
pub const DEFAULT_FUZZY_MAX_EDITS: usize = 2;

/// Default number of index terms a fuzzy query may expand to.
pub const DEFAULT_FUZZY_MAX_EXPANSIONS: usize = 50;

/// Default segment file name inside the index directory.
pub const DEFAULT_SEGMENT_FILE: &str = "segment.kzs";

/// Configuration for index creation and querying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Analyzer used for new segments. Existing segments keep the analyzer
    /// they were written with.
    pub analyzer: AnalyzerKind,

    /// Number of hits returned by the convenience search methods.
    pub default_limit: usize,

    /// Maximum edit distance of fuzzy queries.
    pub fuzzy_max_edits: usize,

    /// Maximum number of terms one fuzzy query expands to.
    pub fuzzy_max_expansions: usize,

    /// Hard cap on the number of documents in a segment.
    pub max_documents: Option<usize>,

    /// Segment file name inside the storage.
    pub segment_file: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            analyzer: AnalyzerKind::default(),
            default_limit: DEFAULT_LIMIT,
            fuzzy_max_edits: DEFAULT_FUZZY_MAX_EDITS,
            fuzzy_max_expansions: DEFAULT_FUZZY_MAX_EXPANSIONS,
            max_documents: None,
            segment_file: DEFAULT_SEGMENT_FILE.to_string(),
        }
    }
}

impl IndexConfig {
    /// Load a configuration from a JSON file. Missing keys take their
    /// default values.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: IndexConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values for consistency.
    pub fn validate(&self) -> Result<()> {
        if self.default_limit == 0 {
            return Err(KazsearchError::invalid_argument(
                "default_limit must be positive",
            ));
        }
        if self.fuzzy_max_expansions == 0 {
            return Err(KazsearchError::invalid_argument(
                "fuzzy_max_expansions must be positive",
            ));
        }
        if self.segment_file.is_empty() || self.segment_file.contains(['/', '\\']) {
            return Err(KazsearchError::invalid_argument(format!(
                "invalid segment file name '{}'",
                self.segment_file
            )));
        }
        Ok(())
    }

    /// Set the analyzer.
    pub fn with_analyzer(mut self, analyzer: AnalyzerKind) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Set the default result limit.
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Set the fuzzy edit distance.
    pub fn with_fuzzy_max_edits(mut self, max_edits: usize) -> Self {
        self.fuzzy_max_edits = max_edits;
        self
    }

    /// Set the fuzzy expansion limit.
    pub fn with_fuzzy_max_expansions(mut self, max_expansions: usize) -> Self {
        self.fuzzy_max_expansions = max_expansions;
        self
    }

    /// Cap the number of documents.
    pub fn with_max_documents(mut self, max_documents: usize) -> Self {
        self.max_documents = Some(max_documents);
        self
    }

    /// Set the segment file name.
    pub fn with_segment_file<S: Into<String>>(mut self, name: S) -> Self {
        self.segment_file = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = IndexConfig::default();

        assert_eq!(config.analyzer, AnalyzerKind::Russian);
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.fuzzy_max_edits, 2);
        assert_eq!(config.fuzzy_max_expansions, 50);
        assert_eq!(config.max_documents, None);
        assert_eq!(config.segment_file, "segment.kzs");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"analyzer": "english", "max_documents": 5}}"#).unwrap();

        let config = IndexConfig::from_file(file.path()).unwrap();

        assert_eq!(config.analyzer, AnalyzerKind::English);
        assert_eq!(config.max_documents, Some(5));
        assert_eq!(config.default_limit, 10);
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_limit": 0}}"#).unwrap();

        assert!(matches!(
            IndexConfig::from_file(file.path()),
            Err(KazsearchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_builder() {
        let config = IndexConfig::default()
            .with_analyzer(AnalyzerKind::Simple)
            .with_fuzzy_max_edits(1)
            .with_segment_file("other.kzs");

        assert_eq!(config.analyzer, AnalyzerKind::Simple);
        assert_eq!(config.fuzzy_max_edits, 1);
        assert_eq!(config.segment_file, "other.kzs");
        assert!(config.with_segment_file("a/b").validate().is_err());
    }
}
