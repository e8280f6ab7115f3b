//! Analyzers: a tokenizer plus token filters.
//!
//! Every built-in analyzer is a [`PipelineAnalyzer`] of the same shape
//! (regex tokenizer, lowercase, optional stop lists). [`AnalyzerKind`] names
//! one so it can be chosen from configuration and recorded in a segment.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::{KazsearchError, Result};

#[allow(clippy::module_inception)]
pub mod analyzer;
pub mod language;
pub mod pipeline;

/// The built-in analyzers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    /// English stop words.
    Standard,
    /// English stop words.
    English,
    #[default]
    Russian,
    /// Kazakh and Russian stop words.
    Kazakh,
    /// Lowercasing only.
    Simple,
}

impl AnalyzerKind {
    pub const ALL: [AnalyzerKind; 5] = [
        AnalyzerKind::Standard,
        AnalyzerKind::English,
        AnalyzerKind::Russian,
        AnalyzerKind::Kazakh,
        AnalyzerKind::Simple,
    ];

    pub fn build(self) -> Result<Arc<dyn Analyzer>> {
        let mut pipeline = PipelineAnalyzer::new(self.as_str(), Arc::new(RegexTokenizer::new()?))
            .with_filter(Arc::new(LowercaseFilter));

        let stop_lists = self.stop_lists();
        if !stop_lists.is_empty() {
            pipeline = pipeline.with_filter(Arc::new(StopFilter::from_lists(stop_lists)));
        }

        Ok(Arc::new(pipeline))
    }

    fn stop_lists(self) -> &'static [&'static [&'static str]] {
        match self {
            AnalyzerKind::Standard | AnalyzerKind::English => &[language::english::STOP_WORDS],
            AnalyzerKind::Russian => &[language::russian::STOP_WORDS],
            AnalyzerKind::Kazakh => &[language::kazakh::STOP_WORDS, language::russian::STOP_WORDS],
            AnalyzerKind::Simple => &[],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyzerKind::Standard => "standard",
            AnalyzerKind::English => "english",
            AnalyzerKind::Russian => "russian",
            AnalyzerKind::Kazakh => "kazakh",
            AnalyzerKind::Simple => "simple",
        }
    }
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyzerKind {
    type Err = KazsearchError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.to_ascii_lowercase();
        AnalyzerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| KazsearchError::invalid_argument(format!("unknown analyzer '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(kind: AnalyzerKind, text: &str) -> Vec<String> {
        kind.build().unwrap().tokenize(text).unwrap()
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in AnalyzerKind::ALL {
            assert_eq!(kind.as_str().parse::<AnalyzerKind>().unwrap(), kind);
            assert_eq!(kind.build().unwrap().name(), kind.as_str());
        }
        assert_eq!("Russian".parse::<AnalyzerKind>().unwrap(), AnalyzerKind::Russian);
        assert!("klingon".parse::<AnalyzerKind>().is_err());
        assert_eq!(serde_json::to_string(&AnalyzerKind::Kazakh).unwrap(), "\"kazakh\"");
    }

    #[test]
    fn test_russian() {
        assert_eq!(
            terms(AnalyzerKind::Russian, "Тима и Алия в Алматы"),
            vec!["тима", "алия", "алматы"]
        );
        assert_eq!(terms(AnalyzerKind::Russian, "Қазақстан Өскемен"), vec!["қазақстан", "өскемен"]);
    }

    #[test]
    fn test_kazakh_drops_both_lists() {
        assert_eq!(
            terms(AnalyzerKind::Kazakh, "Тима және Алия приехали в Астану"),
            vec!["тима", "алия", "приехали", "астану"]
        );
    }

    #[test]
    fn test_english_and_simple() {
        assert_eq!(terms(AnalyzerKind::English, "The road home"), vec!["road", "home"]);
        assert_eq!(terms(AnalyzerKind::Standard, "The road home"), vec!["road", "home"]);
        assert_eq!(terms(AnalyzerKind::Simple, "The road и"), vec!["the", "road", "и"]);
    }

    #[test]
    fn test_underscore_splits_terms() {
        assert_eq!(terms(AnalyzerKind::Russian, "ALMATY_REGION"), vec!["almaty", "region"]);
    }

    #[test]
    fn test_total_on_empty_input() {
        for kind in AnalyzerKind::ALL {
            assert!(terms(kind, "").is_empty());
            assert!(terms(kind, "  ,.;  ").is_empty());
        }
    }
}
