//! Error types for the kazsearch library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`KazsearchError`] enum.
//!
//! # Examples
//!
//! ```
//! use kazsearch::error::{KazsearchError, Result};
//!
//! fn example_operation(limit: usize) -> Result<()> {
//!     if limit == 0 {
//!         return Err(KazsearchError::invalid_argument("limit must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(example_operation(0).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for kazsearch operations.
#[derive(Error, Debug)]
pub enum KazsearchError {
    /// A caller supplied a value outside the accepted domain
    /// (non-positive result limit, empty field list, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A document id was never assigned or has been deleted.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The index could not grow any further. Fatal for the indexing call
    /// that hit it; the segment stays in its pre-call state.
    #[error("Corpus exhausted: {0}")]
    CorpusExhausted(String),

    /// A field value does not convert to its declared type.
    #[error("Malformed value {value:?} for field '{field}': {reason}")]
    MalformedFieldValue {
        /// Field name.
        field: String,
        /// The raw value as supplied.
        value: String,
        /// Why the conversion failed.
        reason: String,
    },

    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Query-related errors (parsing, invalid queries, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// Storage-related errors (corrupt or missing segment files)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Segment encoding/decoding errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with KazsearchError.
pub type Result<T> = std::result::Result<T, KazsearchError>;

impl KazsearchError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        KazsearchError::InvalidArgument(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        KazsearchError::NotFound(msg.into())
    }

    /// Create a new corpus exhausted error.
    pub fn corpus_exhausted<S: Into<String>>(msg: S) -> Self {
        KazsearchError::CorpusExhausted(msg.into())
    }

    /// Create a new malformed field value error.
    pub fn malformed_field<F, V, R>(field: F, value: V, reason: R) -> Self
    where
        F: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        KazsearchError::MalformedFieldValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        KazsearchError::Analysis(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        KazsearchError::Query(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        KazsearchError::Query(msg.into()) // Parse errors are treated as query errors
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        KazsearchError::Storage(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        KazsearchError::Serialization(msg.into())
    }
}

impl From<bincode::Error> for KazsearchError {
    fn from(err: bincode::Error) -> Self {
        KazsearchError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = KazsearchError::invalid_argument("limit must be positive");
        assert_eq!(error.to_string(), "Invalid argument: limit must be positive");

        let error = KazsearchError::not_found("document 7");
        assert_eq!(error.to_string(), "Not found: document 7");

        let error = KazsearchError::malformed_field("creationDate", "yesterday", "bad format");
        assert_eq!(
            error.to_string(),
            "Malformed value \"yesterday\" for field 'creationDate': bad format"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = KazsearchError::from(io_error);

        match error {
            KazsearchError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
