//! Error types for bucket domain validation.

use thiserror::Error;

/// Errors returned while constructing domain bucket values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BucketDomainError {
    /// The item name is empty after trimming.
    #[error("bucket item name must not be empty")]
    EmptyItemName,

    /// The uploaded file name is empty after trimming.
    #[error("uploaded file name must not be empty")]
    EmptyFileName,

    /// The storage reference is empty after trimming.
    #[error("file reference must not be empty")]
    EmptyReference,
}
