//! An analyzer assembled from parts.
//!
//! ```
//! use std::sync::Arc;
//! use kazsearch::analysis::analyzer::analyzer::Analyzer;
//! use kazsearch::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use kazsearch::analysis::token_filter::lowercase::LowercaseFilter;
//! use kazsearch::analysis::token_filter::stop::StopFilter;
//! use kazsearch::analysis::tokenizer::regex::RegexTokenizer;
//!
//! let analyzer = PipelineAnalyzer::new("headlines", Arc::new(RegexTokenizer::new().unwrap()))
//!     .with_filter(Arc::new(LowercaseFilter))
//!     .with_filter(Arc::new(StopFilter::from_words(["в"])));
//!
//! assert_eq!(analyzer.tokenize("Снег в Астане").unwrap(), vec!["снег", "астане"]);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token::Token;
use crate::analysis::token_filter::TokenFilter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer followed by filters, applied in insertion order.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    name: String,
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn TokenFilter>>,
}

impl PipelineAnalyzer {
    pub fn new<S: Into<String>>(name: S, tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: name.into(),
            tokenizer,
            filters: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: Arc<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|filter| filter.name()).collect()
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Token>> {
        let tokens = self.tokenizer.tokenize(text);
        Ok(self
            .filters
            .iter()
            .fold(tokens, |tokens, filter| filter.apply(tokens)))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field("filters", &self.filter_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token_filter::lowercase::LowercaseFilter;
    use crate::analysis::token_filter::stop::StopFilter;
    use crate::analysis::tokenizer::regex::RegexTokenizer;

    fn tokenizer() -> Arc<dyn Tokenizer> {
        Arc::new(RegexTokenizer::new().unwrap())
    }

    #[test]
    fn test_filters_run_in_order() {
        let stop_then_lower = PipelineAnalyzer::new("a", tokenizer())
            .with_filter(Arc::new(StopFilter::from_words(["в"])))
            .with_filter(Arc::new(LowercaseFilter));
        let lower_then_stop = PipelineAnalyzer::new("b", tokenizer())
            .with_filter(Arc::new(LowercaseFilter))
            .with_filter(Arc::new(StopFilter::from_words(["в"])));

        assert_eq!(stop_then_lower.tokenize("В Астане").unwrap(), vec!["в", "астане"]);
        assert_eq!(lower_then_stop.tokenize("В Астане").unwrap(), vec!["астане"]);
    }

    #[test]
    fn test_no_filters_keeps_raw_tokens() {
        let analyzer = PipelineAnalyzer::new("raw", tokenizer());
        assert_eq!(analyzer.tokenize("ALMATY_REGION").unwrap(), vec!["ALMATY", "REGION"]);
    }

    #[test]
    fn test_name_and_debug() {
        let analyzer =
            PipelineAnalyzer::new("custom", tokenizer()).with_filter(Arc::new(LowercaseFilter));

        assert_eq!(analyzer.name(), "custom");
        assert_eq!(analyzer.filter_names(), vec!["lowercase"]);
        assert!(format!("{analyzer:?}").contains("regex"));
    }
}
