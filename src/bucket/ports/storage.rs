//! Storage port for file bytes.
//!
//! The upload contract is fire-and-once: one attempt, no retry on
//! transient failure. Failures surface directly to the caller.

use crate::bucket::domain::{FileRef, FileUpload};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for file storage operations.
pub type FileStorageResult<T> = Result<T, FileStorageError>;

/// Blob storage contract.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Stores the upload and returns the reference the backend issued.
    ///
    /// # Errors
    ///
    /// Returns [`FileStorageError`] when the backend rejects or fails the
    /// upload. No retry is attempted.
    async fn put(&self, upload: FileUpload) -> FileStorageResult<FileRef>;

    /// Removes a stored file. Idempotent: removing an unknown reference
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`FileStorageError`] when the backend fails the removal.
    async fn remove(&self, file: &FileRef) -> FileStorageResult<()>;
}

/// Errors returned by file storage implementations.
#[derive(Debug, Clone, Error)]
pub enum FileStorageError {
    /// The backend rejected the request.
    #[error("storage rejected the request: {0}")]
    Rejected(String),

    /// The backend failed.
    #[error("storage backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl FileStorageError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
