//! Storage abstraction layer.
//!
//! Segments are persisted as whole files through the [`Storage`] trait, so the
//! index code never touches the filesystem directly.
//!
//! # Storage Types
//!
//! - [`file::FileStorage`] - one directory on disk
//! - [`memory::MemoryStorage`] - a map of byte buffers, for tests and
//!   throw-away indexes
//!
//! # Example
//!
//! ```
//! use kazsearch::storage::Storage;
//! use kazsearch::storage::memory::MemoryStorage;
//!
//! # fn main() -> kazsearch::error::Result<()> {
//! let storage = MemoryStorage::new();
//! storage.write_file("segment.kzs", b"payload")?;
//! assert_eq!(storage.read_file("segment.kzs")?, b"payload");
//! # Ok(())
//! # }
//! ```

use crate::error::Result;

pub mod file;
pub mod memory;

/// A flat namespace of named files.
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// Read a whole file. Missing files are a `Storage` error.
    fn read_file(&self, name: &str) -> Result<Vec<u8>>;

    /// Replace a file's content atomically: readers observe either the old
    /// content or the new one, never a mix.
    fn write_file(&self, name: &str, data: &[u8]) -> Result<()>;

    /// Check whether a file exists.
    fn file_exists(&self, name: &str) -> bool;

    /// Delete a file. Deleting a missing file is not an error.
    fn delete_file(&self, name: &str) -> Result<()>;

    /// List file names, sorted.
    fn list_files(&self) -> Result<Vec<String>>;

    /// Remove every file and release the backing location.
    fn destroy(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::file::FileStorage;
    use crate::storage::memory::MemoryStorage;

    fn exercise(storage: &dyn Storage) {
        assert!(!storage.file_exists("a"));
        assert!(storage.read_file("a").is_err());

        storage.write_file("b", b"two").unwrap();
        storage.write_file("a", b"one").unwrap();
        storage.write_file("a", b"uno").unwrap();

        assert_eq!(storage.read_file("a").unwrap(), b"uno");
        assert_eq!(storage.list_files().unwrap(), vec!["a", "b"]);

        storage.delete_file("b").unwrap();
        storage.delete_file("b").unwrap();
        assert_eq!(storage.list_files().unwrap(), vec!["a"]);

        storage.destroy().unwrap();
        assert!(!storage.file_exists("a"));
    }

    #[test]
    fn test_memory_storage_contract() {
        exercise(&MemoryStorage::new());
    }

    #[test]
    fn test_file_storage_contract() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("index")).unwrap();
        exercise(&storage);
    }
}
