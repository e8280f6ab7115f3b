//! In-memory storage implementation for testing.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::{KazsearchError, Result};
use crate::storage::Storage;

/// An in-memory storage implementation.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: Mutex<HashMap<String, Box<[u8]>>>,
}

impl MemoryStorage {
    /// Create a new, empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of files stored.
    pub fn file_count(&self) -> usize {
        self.files.lock().len()
    }

    /// Get the total size of all files.
    pub fn total_size(&self) -> u64 {
        self.files
            .lock()
            .values()
            .map(|data| data.len() as u64)
            .sum()
    }
}

impl Storage for MemoryStorage {
    fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        self.files
            .lock()
            .get(name)
            .map(|data| data.to_vec())
            .ok_or_else(|| KazsearchError::storage(format!("File not found: {name}")))
    }

    fn write_file(&self, name: &str, data: &[u8]) -> Result<()> {
        self.files
            .lock()
            .insert(name.to_string(), data.to_vec().into_boxed_slice());
        Ok(())
    }

    fn file_exists(&self, name: &str) -> bool {
        self.files.lock().contains_key(name)
    }

    fn delete_file(&self, name: &str) -> Result<()> {
        self.files.lock().remove(name);
        Ok(())
    }

    fn list_files(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.files.lock().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn destroy(&self) -> Result<()> {
        self.files.lock().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        let storage = MemoryStorage::new();
        storage.write_file("x", &[0; 8]).unwrap();
        storage.write_file("y", &[0; 4]).unwrap();

        assert_eq!(storage.file_count(), 2);
        assert_eq!(storage.total_size(), 12);
    }
}
