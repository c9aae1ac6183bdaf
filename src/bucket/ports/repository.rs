//! Repository port for bucket item persistence and lookup.

use crate::bucket::domain::{BucketItem, BucketItemId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for bucket repository operations.
pub type BucketRepositoryResult<T> = Result<T, BucketRepositoryError>;

/// Bucket item persistence contract.
#[async_trait]
pub trait BucketRepository: Send + Sync {
    /// Stores a new bucket item.
    ///
    /// # Errors
    ///
    /// Returns [`BucketRepositoryError::DuplicateItem`] when the item ID
    /// already exists.
    async fn store(&self, item: &BucketItem) -> BucketRepositoryResult<()>;

    /// Finds an item by identifier.
    ///
    /// Returns `None` when the item does not exist.
    async fn find_by_id(&self, id: BucketItemId) -> BucketRepositoryResult<Option<BucketItem>>;

    /// Returns every stored item.
    async fn list_all(&self) -> BucketRepositoryResult<Vec<BucketItem>>;

    /// Deletes an item record.
    ///
    /// # Errors
    ///
    /// Returns [`BucketRepositoryError::NotFound`] when the item does not
    /// exist.
    async fn delete(&self, id: BucketItemId) -> BucketRepositoryResult<()>;
}

/// Errors returned by bucket repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BucketRepositoryError {
    /// An item with the same identifier already exists.
    #[error("duplicate bucket item identifier: {0}")]
    DuplicateItem(BucketItemId),

    /// The item was not found.
    #[error("bucket item not found: {0}")]
    NotFound(BucketItemId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BucketRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
