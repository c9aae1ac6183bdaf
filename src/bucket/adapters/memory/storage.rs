//! In-memory blob storage for tests and in-process use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::bucket::{
    domain::{FileRef, FileUpload},
    ports::{FileStorage, FileStorageError, FileStorageResult},
};

/// Thread-safe in-memory blob store keyed by issued reference.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFileStorage {
    state: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryFileStorage {
    /// Creates an empty in-memory blob store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored bytes for a reference, if present.
    ///
    /// # Errors
    ///
    /// Returns [`FileStorageError::Backend`] when the store lock is
    /// poisoned.
    pub fn bytes_of(&self, file: &FileRef) -> FileStorageResult<Option<Vec<u8>>> {
        let blobs = self.state.read().map_err(lock_error)?;
        Ok(blobs.get(file.reference()).cloned())
    }

    /// Returns the number of stored blobs.
    ///
    /// # Errors
    ///
    /// Returns [`FileStorageError::Backend`] when the store lock is
    /// poisoned.
    pub fn len(&self) -> FileStorageResult<usize> {
        let blobs = self.state.read().map_err(lock_error)?;
        Ok(blobs.len())
    }

    /// Returns whether the store holds no blobs.
    ///
    /// # Errors
    ///
    /// Returns [`FileStorageError::Backend`] when the store lock is
    /// poisoned.
    pub fn is_empty(&self) -> FileStorageResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn lock_error(err: impl std::fmt::Display) -> FileStorageError {
    FileStorageError::backend(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn put(&self, upload: FileUpload) -> FileStorageResult<FileRef> {
        let reference = format!("mem/{}_{}", Uuid::new_v4(), upload.name());
        let file = FileRef::new(&reference, upload.content_type())
            .map_err(|err| FileStorageError::Rejected(err.to_string()))?;
        let mut blobs = self.state.write().map_err(lock_error)?;
        blobs.insert(reference, upload.into_data());
        Ok(file)
    }

    async fn remove(&self, file: &FileRef) -> FileStorageResult<()> {
        let mut blobs = self.state.write().map_err(lock_error)?;
        blobs.remove(file.reference());
        Ok(())
    }
}
