//! Indexing messages.

use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::error::{KazsearchError, Result};
use crate::index::config::IndexConfig;
use crate::index::index::Index;
use crate::index::posting::DocId;
use crate::message::model::{Message, load_messages};
use crate::message::search::MessageSearch;

/// A field value that was replaced by a default while indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexingWarning {
    /// Position of the message in the input batch.
    pub position: usize,
    pub field: String,
    pub value: String,
    pub reason: String,
}

/// Outcome of one indexing call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexingSummary {
    /// Number of messages indexed.
    pub indexed: usize,
    /// Ids assigned, in input order.
    pub doc_ids: Vec<DocId>,
    /// Degraded field values; the messages were still indexed.
    pub warnings: Vec<IndexingWarning>,
}

/// Builds and opens message indexes.
#[derive(Debug)]
pub struct MessageIndexer {
    index: Index,
}

impl MessageIndexer {
    pub fn new(index: Index) -> Self {
        MessageIndexer { index }
    }

    /// Open (or start) the index stored in `dir`.
    pub fn open<P: AsRef<Path>>(dir: P, config: IndexConfig) -> Result<Self> {
        Ok(Self::new(Index::open_in_dir(dir, config)?))
    }

    pub fn in_memory(config: IndexConfig) -> Result<Self> {
        Ok(Self::new(Index::in_memory(config)?))
    }

    pub fn index_handle(&self) -> &Index {
        &self.index
    }

    /// Index `messages`; with `create_new` the previous content is dropped.
    ///
    /// A malformed creation date does not stop the batch: the message is
    /// indexed with date 0 and a warning is returned. Engine errors abort
    /// the call and leave the index as it was.
    pub fn index(&self, create_new: bool, messages: &[Message]) -> Result<IndexingSummary> {
        let mut warnings = Vec::new();
        let mut documents = Vec::with_capacity(messages.len());

        for (position, message) in messages.iter().enumerate() {
            let (document, problem) = message.to_document();
            if let Some(problem) = problem {
                warn!("message {position}: {problem}; indexed with a default value");
                warnings.push(to_warning(position, problem));
            }
            documents.push(document);
        }

        let doc_ids = self.index.index(create_new, documents)?;
        info!(
            "indexed {} messages with {} warnings",
            doc_ids.len(),
            warnings.len()
        );

        Ok(IndexingSummary {
            indexed: doc_ids.len(),
            doc_ids,
            warnings,
        })
    }

    /// Index the messages of a JSON or JSON-lines file.
    pub fn index_file<P: AsRef<Path>>(&self, create_new: bool, path: P) -> Result<IndexingSummary> {
        let messages = load_messages(path)?;
        self.index(create_new, &messages)
    }

    /// Searches over the current content.
    pub fn read_index(&self) -> Result<MessageSearch> {
        MessageSearch::open(&self.index)
    }

    /// Remove the index and its files.
    pub fn destroy(self) -> Result<()> {
        self.index.destroy()
    }
}

fn to_warning(position: usize, problem: KazsearchError) -> IndexingWarning {
    match problem {
        KazsearchError::MalformedFieldValue {
            field,
            value,
            reason,
        } => IndexingWarning {
            position,
            field,
            value,
            reason,
        },
        other => IndexingWarning {
            position,
            field: String::new(),
            value: String::new(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::model::CREATION_DATE;

    fn messages() -> Vec<Message> {
        vec![
            Message::new("Тима приехал", "", ["Астана"], "Feb 1, 2016 10:00:00 AM"),
            Message::new("Тима уехал", "", ["ALMATY_REGION"], "not a date"),
        ]
    }

    #[test]
    fn test_index_reports_warnings() {
        let indexer = MessageIndexer::in_memory(IndexConfig::default()).unwrap();

        let summary = indexer.index(true, &messages()).unwrap();

        assert_eq!(summary.indexed, 2);
        assert_eq!(summary.doc_ids, vec![0, 1]);
        assert_eq!(summary.warnings.len(), 1);
        assert_eq!(summary.warnings[0].position, 1);
        assert_eq!(summary.warnings[0].field, CREATION_DATE);
        assert_eq!(summary.warnings[0].value, "not a date");
    }

    #[test]
    fn test_create_new_discards_previous() {
        let indexer = MessageIndexer::in_memory(IndexConfig::default()).unwrap();
        indexer.index(true, &messages()).unwrap();

        let appended = indexer.index(false, &messages()).unwrap();
        assert_eq!(appended.doc_ids, vec![2, 3]);

        let recreated = indexer.index(true, &messages()[..1]).unwrap();
        assert_eq!(recreated.doc_ids, vec![0]);
        assert_eq!(indexer.index_handle().segment().doc_count(), 1);
    }

    #[test]
    fn test_index_file_and_destroy() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("messages.json");
        std::fs::write(&input, serde_json::to_string(&messages()).unwrap()).unwrap();
        let index_dir = dir.path().join("index");

        let indexer = MessageIndexer::open(&index_dir, IndexConfig::default()).unwrap();
        let summary = indexer.index_file(true, &input).unwrap();
        assert_eq!(summary.indexed, 2);

        indexer.destroy().unwrap();
        assert!(!index_dir.exists());
    }
}
