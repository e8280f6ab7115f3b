//! Documents: ordered collections of named fields.
//!
//! - [`document::Document`] - the field list handed to an index writer
//! - [`document::DocumentBuilder`] - fluent construction (`add_field`, then `build`)
//! - [`field::Field`] / [`field::FieldValue`] / [`field::FieldOption`] - one
//!   named value with its stored/indexed/tokenized flags
//!
//! # Examples
//!
//! ```
//! use kazsearch::document::document::Document;
//!
//! let doc = Document::builder()
//!     .add_text("title", "Тима приехал")
//!     .add_text("region", "Астана")
//!     .add_integer("creationDate", 1454284800)
//!     .build();
//!
//! assert_eq!(doc.len(), 3);
//! assert!(doc.has_field("title"));
//! ```

#[allow(clippy::module_inception)]
pub mod document;
pub mod field;
