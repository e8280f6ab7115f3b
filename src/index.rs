//! The inverted index: postings, segments, the writer, and the index handle.
//!
//! # Module Structure
//!
//! - [`config`] - [`IndexConfig`](config::IndexConfig), loadable from JSON
//! - [`posting`] - postings and posting lists ordered by document id
//! - [`segment`] - the per-field term dictionaries, numeric values and
//!   stored fields of one indexing session, plus its on-disk codec
//! - [`writer`] - [`IndexWriter`](writer::IndexWriter), the only mutator of a segment
//! - [`index`] - [`Index`](index::Index), which owns storage and publishes
//!   committed segments to readers
//!
//! # Examples
//!
//! ```
//! use kazsearch::document::document::Document;
//! use kazsearch::index::config::IndexConfig;
//! use kazsearch::index::index::Index;
//!
//! # fn main() -> kazsearch::error::Result<()> {
//! let index = Index::in_memory(IndexConfig::default())?;
//!
//! let doc = Document::builder()
//!     .add_text("title", "Тима приехал")
//!     .build();
//! let ids = index.index(true, vec![doc])?;
//!
//! assert_eq!(ids, vec![0]);
//! assert_eq!(index.segment().term_doc_frequency("title"), 2);
//! # Ok(())
//! # }
//! ```

pub mod config;
#[allow(clippy::module_inception)]
pub mod index;
pub mod posting;
pub mod segment;
pub mod writer;
