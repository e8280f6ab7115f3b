//! Index writer.
//!
//! An [`IndexWriter`] stages changes on a private copy of a segment. Nothing
//! it does is visible to readers until the [`Index`](crate::index::index::Index)
//! that created it publishes the result of [`IndexWriter::commit`].
//!
//! Text analysis runs in parallel on the rayon pool; document ids are then
//! assigned sequentially in input order, so the same input always yields the
//! same ids.

use std::collections::BTreeMap;
use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, info};
use rayon::prelude::*;

use crate::analysis::analyzer::AnalyzerKind;
use crate::analysis::analyzer::analyzer::Analyzer;
use crate::document::document::Document;
use crate::document::field::FieldValue;
use crate::error::{KazsearchError, Result};
use crate::index::config::IndexConfig;
use crate::index::posting::DocId;
use crate::index::segment::{AnalyzedDocument, Segment, StoredFields};

/// Statistics about one writer session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Number of documents added.
    pub docs_added: u64,
    /// Number of documents deleted.
    pub docs_deleted: u64,
}

/// The only mutator of a segment.
pub struct IndexWriter {
    segment: Segment,
    analyzer: Arc<dyn Analyzer>,
    max_documents: Option<usize>,
    stats: WriterStats,
}

impl IndexWriter {
    /// Start a writer on an empty segment.
    pub fn create(config: &IndexConfig) -> Result<Self> {
        Self::with_segment(Segment::new(config.analyzer), config)
    }

    /// Start a writer that appends to a copy of `base`.
    ///
    /// The base segment's analyzer is kept so old and new terms agree.
    pub fn append(base: &Segment, config: &IndexConfig) -> Result<Self> {
        Self::with_segment(base.clone(), config)
    }

    fn with_segment(segment: Segment, config: &IndexConfig) -> Result<Self> {
        let analyzer = segment.analyzer_kind().build()?;
        Ok(IndexWriter {
            segment,
            analyzer,
            max_documents: config.max_documents,
            stats: WriterStats::default(),
        })
    }

    /// The analyzer applied to tokenized fields.
    pub fn analyzer_kind(&self) -> AnalyzerKind {
        self.segment.analyzer_kind()
    }

    /// The staged segment.
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Session statistics.
    pub fn stats(&self) -> &WriterStats {
        &self.stats
    }

    /// Add one document and return its id.
    pub fn add_document(&mut self, doc: Document) -> Result<DocId> {
        let ids = self.add_documents(vec![doc])?;
        ids.into_iter()
            .next()
            .ok_or_else(|| KazsearchError::corpus_exhausted("no id assigned"))
    }

    /// Add documents in order and return their ids.
    ///
    /// Either every document is added or, on error, none is.
    pub fn add_documents(&mut self, docs: Vec<Document>) -> Result<Vec<DocId>> {
        self.ensure_capacity(docs.len())?;

        let analyzer = Arc::clone(&self.analyzer);
        let analyzed = docs
            .into_par_iter()
            .map(|doc| analyze_document(analyzer.as_ref(), doc))
            .collect::<Result<Vec<_>>>()?;

        let mut ids = Vec::with_capacity(analyzed.len());
        for doc in analyzed {
            ids.push(self.segment.insert(doc)?);
        }

        self.stats.docs_added += ids.len() as u64;
        debug!(
            "staged {} documents, segment now holds {}",
            ids.len(),
            self.segment.doc_count()
        );
        Ok(ids)
    }

    /// Delete a document by id.
    ///
    /// Fails with `NotFound` if the id was never assigned or is already
    /// deleted.
    pub fn delete_document(&mut self, doc_id: DocId) -> Result<()> {
        self.segment.delete(doc_id)?;
        self.stats.docs_deleted += 1;
        Ok(())
    }

    /// Discard everything staged so far and re-add `docs` with ids from 0.
    pub fn rebuild(&mut self, docs: Vec<Document>) -> Result<Vec<DocId>> {
        let kind = self.segment.analyzer_kind();
        let previous = std::mem::replace(&mut self.segment, Segment::new(kind));
        match self.add_documents(docs) {
            Ok(ids) => {
                info!("rebuilt segment with {} documents", ids.len());
                Ok(ids)
            }
            Err(e) => {
                self.segment = previous;
                Err(e)
            }
        }
    }

    /// Finish the session and hand over the staged segment.
    pub fn commit(self) -> Segment {
        info!(
            "committing segment: {} added, {} deleted, {} live",
            self.stats.docs_added,
            self.stats.docs_deleted,
            self.segment.live_doc_count()
        );
        self.segment
    }

    fn ensure_capacity(&mut self, additional: usize) -> Result<()> {
        let current = self.segment.doc_count() as usize;
        if let Some(max) = self.max_documents {
            if current.saturating_add(additional) > max {
                return Err(KazsearchError::corpus_exhausted(format!(
                    "adding {additional} documents to {current} exceeds the limit of {max}"
                )));
            }
        }
        self.segment.try_reserve(additional)
    }
}

impl std::fmt::Debug for IndexWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexWriter")
            .field("analyzer", &self.analyzer.name())
            .field("doc_count", &self.segment.doc_count())
            .field("stats", &self.stats)
            .finish()
    }
}

fn analyze_document(analyzer: &dyn Analyzer, doc: Document) -> Result<AnalyzedDocument> {
    let mut terms: AHashMap<String, (AHashMap<String, u32>, u32)> = AHashMap::new();
    let mut numbers = Vec::new();
    let mut stored = StoredFields::new();

    for field in doc.fields() {
        if field.option.indexed {
            match &field.value {
                FieldValue::Text(text) => {
                    let tokens = if field.option.tokenized {
                        analyzer.tokenize(text)?
                    } else {
                        vec![text.clone()]
                    };
                    let (freqs, length) = terms.entry(field.name.clone()).or_default();
                    for token in tokens {
                        *freqs.entry(token).or_insert(0) += 1;
                        *length += 1;
                    }
                }
                FieldValue::Integer(value) => numbers.push((field.name.clone(), *value)),
            }
        }
        if field.option.stored {
            stored.insert(field.name.clone(), field.value.clone());
        }
    }

    let terms = terms
        .into_iter()
        .map(|(name, (freqs, length))| {
            let freqs: BTreeMap<_, _> = freqs.into_iter().collect();
            (name, freqs, length)
        })
        .collect();

    Ok(AnalyzedDocument {
        terms,
        numbers,
        stored,
    })
}
