//! # kazsearch
//!
//! A small full-text search engine for news messages written in Kazakh and
//! Russian.
//!
//! ## Features
//!
//! - Text analysis pipeline (regex tokenizer, lowercasing, stop words)
//! - Inverted index with stored fields and integer fields
//! - Term, boolean, numeric range, fuzzy, multi-field and more-like-this
//!   queries, plus a query-string parser
//! - tf·idf scoring with deterministic ranking
//! - Checksummed single-file segments on disk, or in-memory storage
//!
//! ## Example
//!
//! ```
//! use kazsearch::index::config::IndexConfig;
//! use kazsearch::message::indexer::MessageIndexer;
//! use kazsearch::message::model::Message;
//!
//! let indexer = MessageIndexer::in_memory(IndexConfig::default()).unwrap();
//! indexer
//!     .index(
//!         true,
//!         &[Message::new("Тима приехал", "", ["Астана"], "Feb 1, 2016 10:00:00 AM")],
//!     )
//!     .unwrap();
//!
//! let search = indexer.read_index().unwrap();
//! let results = search.search_in_multi_field("Тима", 10).unwrap();
//! assert_eq!(results.doc_ids(), vec![0]);
//! ```

pub mod analysis;
pub mod cli;
pub mod document;
pub mod error;
pub mod index;
pub mod message;
pub mod query;
pub mod search;
pub mod storage;
pub mod util;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
