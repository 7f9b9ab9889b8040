//! File-backed save-slot backend.
//!
//! The native analog of the original's browser-local storage: one JSON
//! document at a configurable path. Writes go through a sibling
//! temporary file and a rename so an interrupted save never truncates
//! the previous record.

use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Save slot stored as a single JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store for the given file path. The file need not exist
    /// yet; parent directories are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the save file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store the serialized save record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the write or rename fails.
    pub async fn write(&self, json: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read the serialized save record, if the file exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for failures other than a missing file.
    pub async fn read(&self) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the save file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for failures other than a missing file.
    pub async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("idlemine-file-store-{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn missing_file_reads_as_none() {
        let store = FileStore::new(scratch_path());
        assert!(store.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn write_then_read_roundtrips() {
        let store = FileStore::new(scratch_path());
        store.write(r#"{"balance":"1"}"#).await.unwrap();
        let json = store.read().await.unwrap().unwrap();
        assert_eq!(json, r#"{"balance":"1"}"#);
        store.clear().await.unwrap();
        assert!(store.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn overwrite_replaces_the_record() {
        let store = FileStore::new(scratch_path());
        store.write("first").await.unwrap();
        store.write("second").await.unwrap();
        assert_eq!(store.read().await.unwrap().unwrap(), "second");
        store.clear().await.unwrap();
    }
}
