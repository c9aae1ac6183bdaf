//! Port contracts for the shared file bucket.

pub mod repository;
pub mod storage;

pub use repository::{BucketRepository, BucketRepositoryError, BucketRepositoryResult};
pub use storage::{FileStorage, FileStorageError, FileStorageResult};
