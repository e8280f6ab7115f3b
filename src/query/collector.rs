//! Collector implementations for gathering search results.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;

use crate::index::posting::DocId;

/// Trait for collecting search results.
pub trait Collector: Debug {
    /// Collect a document hit.
    fn collect(&mut self, doc_id: DocId, score: f32);

    /// Get the total number of hits collected.
    fn total_hits(&self) -> u64;
}

/// A collector that keeps the top N documents by score.
///
/// Ties are broken by ascending document id, so rankings are deterministic.
#[derive(Debug)]
pub struct TopDocsCollector {
    /// Maximum number of documents to collect.
    max_docs: usize,
    /// Kept hits; the heap top is the worst of them.
    hits: BinaryHeap<ScoredDoc>,
    /// Total number of documents processed.
    total_hits: u64,
}

/// A scored document for use in the heap.
#[derive(Debug, Clone, Copy)]
struct ScoredDoc {
    doc_id: DocId,
    score: f32,
}

impl PartialEq for ScoredDoc {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredDoc {}

impl PartialOrd for ScoredDoc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredDoc {
    /// Better hits order first: higher score, then lower id.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.doc_id.cmp(&other.doc_id))
    }
}

impl TopDocsCollector {
    /// Create a new top docs collector.
    pub fn new(max_docs: usize) -> Self {
        TopDocsCollector {
            max_docs,
            hits: BinaryHeap::with_capacity(max_docs.min(1024) + 1),
            total_hits: 0,
        }
    }

    /// Get the maximum number of documents to collect.
    pub fn max_docs(&self) -> usize {
        self.max_docs
    }

    /// Consume the collector, returning `(doc_id, score)` best first.
    pub fn into_sorted(self) -> Vec<(DocId, f32)> {
        self.hits
            .into_sorted_vec()
            .into_iter()
            .map(|doc| (doc.doc_id, doc.score))
            .collect()
    }
}

impl Collector for TopDocsCollector {
    fn collect(&mut self, doc_id: DocId, score: f32) {
        self.total_hits += 1;
        if self.max_docs == 0 {
            return;
        }

        self.hits.push(ScoredDoc { doc_id, score });
        if self.hits.len() > self.max_docs {
            self.hits.pop();
        }
    }

    fn total_hits(&self) -> u64 {
        self.total_hits
    }
}

/// A collector that only counts.
#[derive(Debug, Default)]
pub struct CountCollector {
    count: u64,
}

impl CountCollector {
    /// Create a new count collector.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collector for CountCollector {
    fn collect(&mut self, _doc_id: DocId, _score: f32) {
        self.count += 1;
    }

    fn total_hits(&self) -> u64 {
        self.count
    }
}
