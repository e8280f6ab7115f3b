//! File-based storage implementation.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{KazsearchError, Result};
use crate::storage::Storage;

/// A directory on disk holding the index files.
#[derive(Debug)]
pub struct FileStorage {
    directory: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) the storage directory.
    pub fn new<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();

        if !directory.exists() {
            fs::create_dir_all(&directory).map_err(|e| {
                KazsearchError::storage(format!("Failed to create directory: {e}"))
            })?;
        }

        if !directory.is_dir() {
            return Err(KazsearchError::storage(format!(
                "Path is not a directory: {}",
                directory.display()
            )));
        }

        Ok(FileStorage { directory })
    }

    /// Get the storage directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.directory.join(name)
    }
}

impl Storage for FileStorage {
    fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        fs::read(self.file_path(name)).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                KazsearchError::storage(format!("File not found: {name}"))
            } else {
                KazsearchError::Io(e)
            }
        })
    }

    fn write_file(&self, name: &str, data: &[u8]) -> Result<()> {
        if !self.directory.exists() {
            fs::create_dir_all(&self.directory)?;
        }

        let temp_path = self.file_path(&format!(".{name}.{}.tmp", uuid::Uuid::new_v4()));
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        drop(file);

        if let Err(e) = fs::rename(&temp_path, self.file_path(name)) {
            let _ = fs::remove_file(&temp_path);
            return Err(KazsearchError::storage(format!(
                "Failed to rename file: {e}"
            )));
        }

        debug!(
            "wrote {} bytes to {}",
            data.len(),
            self.file_path(name).display()
        );
        Ok(())
    }

    fn file_exists(&self, name: &str) -> bool {
        self.file_path(name).is_file()
    }

    fn delete_file(&self, name: &str) -> Result<()> {
        let path = self.file_path(name);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| KazsearchError::storage(format!("Failed to delete file: {e}")))?;
        }
        Ok(())
    }

    fn list_files(&self) -> Result<Vec<String>> {
        if !self.directory.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.directory)? {
            let path = entry?.path();
            if path.is_file() {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    files.push(name.to_string());
                }
            }
        }

        files.sort();
        Ok(files)
    }

    fn destroy(&self) -> Result<()> {
        if self.directory.exists() {
            fs::remove_dir_all(&self.directory).map_err(|e| {
                KazsearchError::storage(format!("Failed to remove directory: {e}"))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("index");

        let storage = FileStorage::new(&path).unwrap();

        assert!(path.is_dir());
        assert_eq!(storage.directory(), path.as_path());
    }

    #[test]
    fn test_rejects_regular_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain");
        fs::write(&path, b"x").unwrap();

        assert!(FileStorage::new(&path).is_err());
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        storage.write_file("segment.kzs", b"data").unwrap();

        assert_eq!(storage.list_files().unwrap(), vec!["segment.kzs"]);
    }

    #[test]
    fn test_destroy_removes_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index");
        let storage = FileStorage::new(&path).unwrap();
        storage.write_file("segment.kzs", b"data").unwrap();

        storage.destroy().unwrap();

        assert!(!path.exists());
        assert!(storage.list_files().unwrap().is_empty());
    }
}
