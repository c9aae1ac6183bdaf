//! File reference and upload payload types.

use super::BucketDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a stored file.
///
/// Carries only the backend-issued reference string and the content type;
/// no storage-specific metadata crosses this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    reference: String,
    content_type: String,
}

impl FileRef {
    /// Creates a file reference.
    ///
    /// # Errors
    ///
    /// Returns [`BucketDomainError::EmptyReference`] when the reference is
    /// empty after trimming.
    pub fn new(
        reference: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Result<Self, BucketDomainError> {
        let trimmed = reference.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(BucketDomainError::EmptyReference);
        }
        Ok(Self {
            reference: trimmed,
            content_type: content_type.into(),
        })
    }

    /// Returns the backend-issued reference string.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the content type recorded at upload.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reference)
    }
}

/// Raw bytes and naming handed to a storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    data: Vec<u8>,
    name: String,
    content_type: String,
}

impl FileUpload {
    /// Creates a validated upload payload.
    ///
    /// # Errors
    ///
    /// Returns [`BucketDomainError::EmptyFileName`] when the file name is
    /// empty after trimming.
    pub fn new(
        data: Vec<u8>,
        name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Result<Self, BucketDomainError> {
        let trimmed = name.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(BucketDomainError::EmptyFileName);
        }
        Ok(Self {
            data,
            name: trimmed,
            content_type: content_type.into(),
        })
    }

    /// Returns the raw file bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the upload, returning the raw bytes.
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns the original file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared content type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}
