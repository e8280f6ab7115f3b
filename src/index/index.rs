//! Index handle: storage, configuration and the published segment.

use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use parking_lot::{Mutex, RwLock};

use crate::document::document::Document;
use crate::error::Result;
use crate::index::config::IndexConfig;
use crate::index::posting::DocId;
use crate::index::segment::{IndexStats, Segment};
use crate::index::writer::IndexWriter;
use crate::search::searcher::IndexSearcher;
use crate::storage::Storage;
use crate::storage::file::FileStorage;
use crate::storage::memory::MemoryStorage;

/// An index over one segment.
///
/// Readers take snapshots with [`Index::reader`]; a snapshot never changes,
/// even while a writer session runs. A session's changes become visible all
/// at once, after they have been persisted.
pub struct Index {
    storage: Arc<dyn Storage>,
    config: IndexConfig,
    segment: RwLock<Arc<Segment>>,
    write_lock: Mutex<()>,
}

impl Index {
    /// Open the index held by `storage`, or start an empty one if the
    /// storage has no segment yet.
    pub fn open(storage: Arc<dyn Storage>, config: IndexConfig) -> Result<Self> {
        config.validate()?;

        let segment = if storage.file_exists(&config.segment_file) {
            let bytes = storage.read_file(&config.segment_file)?;
            let segment = Segment::decode(&bytes)?;
            info!(
                "opened segment '{}' with {} documents",
                config.segment_file,
                segment.live_doc_count()
            );
            segment
        } else {
            Segment::new(config.analyzer)
        };

        if segment.analyzer_kind() != config.analyzer && segment.doc_count() > 0 {
            warn!(
                "segment was written with the {} analyzer; ignoring configured {}",
                segment.analyzer_kind(),
                config.analyzer
            );
        }

        Ok(Index {
            storage,
            config,
            segment: RwLock::new(Arc::new(segment)),
            write_lock: Mutex::new(()),
        })
    }

    /// Open (or start) an index in a directory.
    pub fn open_in_dir<P: AsRef<Path>>(dir: P, config: IndexConfig) -> Result<Self> {
        let storage = Arc::new(FileStorage::new(dir)?);
        Self::open(storage, config)
    }

    /// Start an empty index held in memory.
    pub fn in_memory(config: IndexConfig) -> Result<Self> {
        Self::open(Arc::new(MemoryStorage::new()), config)
    }

    /// Index configuration.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// The storage backend.
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// The currently published segment.
    pub fn segment(&self) -> Arc<Segment> {
        Arc::clone(&self.segment.read())
    }

    /// A searcher over the currently published segment.
    pub fn reader(&self) -> Result<IndexSearcher> {
        IndexSearcher::with_config(self.segment(), &self.config)
    }

    /// Run one writer session and publish its result.
    ///
    /// With `create_new` the session starts from an empty segment, so ids
    /// restart at 0; otherwise it appends to the published segment. Sessions
    /// are serialized. If `f` or persisting fails, nothing is published.
    pub fn write<T, F>(&self, create_new: bool, f: F) -> Result<T>
    where
        F: FnOnce(&mut IndexWriter) -> Result<T>,
    {
        let _guard = self.write_lock.lock();

        let mut writer = if create_new {
            IndexWriter::create(&self.config)?
        } else {
            IndexWriter::append(&self.segment(), &self.config)?
        };

        let value = f(&mut writer)?;
        let segment = writer.commit();

        let bytes = segment.encode()?;
        self.storage.write_file(&self.config.segment_file, &bytes)?;

        *self.segment.write() = Arc::new(segment);
        Ok(value)
    }

    /// Index `docs`, discarding prior content when `create_new` is set.
    pub fn index(&self, create_new: bool, docs: Vec<Document>) -> Result<Vec<DocId>> {
        let count = docs.len();
        let ids = self.write(create_new, |writer| writer.add_documents(docs))?;
        info!(
            "indexed {count} documents ({})",
            if create_new { "create" } else { "append" }
        );
        Ok(ids)
    }

    /// Replace the content with `docs`; ids restart at 0.
    pub fn rebuild(&self, docs: Vec<Document>) -> Result<Vec<DocId>> {
        self.index(true, docs)
    }

    /// Delete a document.
    pub fn delete_document(&self, doc_id: DocId) -> Result<()> {
        self.write(false, |writer| writer.delete_document(doc_id))
    }

    /// Statistics of the published segment.
    pub fn stats(&self) -> IndexStats {
        self.segment().stats()
    }

    /// Remove the index and its backing storage.
    pub fn destroy(self) -> Result<()> {
        let _guard = self.write_lock.lock();
        self.storage.destroy()?;
        info!("destroyed index");
        Ok(())
    }
}

impl std::fmt::Debug for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Index")
            .field("storage", &self.storage)
            .field("config", &self.config)
            .field("doc_count", &self.segment.read().doc_count())
            .finish()
    }
}
