//! Service layer for bucket uploads and lookups.

use crate::bucket::{
    domain::{BucketDomainError, BucketItem, BucketItemId, FileUpload},
    ports::{
        BucketRepository, BucketRepositoryError, FileStorage, FileStorageError,
    },
};
use crate::directory::domain::UserId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for uploading a bucket item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBucketItemRequest {
    name: String,
    description: Option<String>,
    tags: Vec<String>,
    uploaded_by: UserId,
    file_name: String,
    content_type: String,
    data: Vec<u8>,
}

impl UploadBucketItemRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        uploaded_by: UserId,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            tags: Vec::new(),
            uploaded_by,
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Sets the item description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the item tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }
}

/// Service-level errors for bucket operations.
#[derive(Debug, Error)]
pub enum BucketServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BucketDomainError),

    /// No bucket item exists with the given identifier.
    #[error("unknown bucket item: {0}")]
    UnknownItem(BucketItemId),

    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] FileStorageError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] BucketRepositoryError),
}

/// Result type for bucket service operations.
pub type BucketServiceResult<T> = Result<T, BucketServiceError>;

/// Bucket orchestration service.
#[derive(Clone)]
pub struct BucketService<R, S, C>
where
    R: BucketRepository,
    S: FileStorage,
    C: Clock + Send + Sync,
{
    items: Arc<R>,
    storage: Arc<S>,
    clock: Arc<C>,
}

impl<R, S, C> BucketService<R, S, C>
where
    R: BucketRepository,
    S: FileStorage,
    C: Clock + Send + Sync,
{
    /// Creates a new bucket service.
    #[must_use]
    pub const fn new(items: Arc<R>, storage: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            items,
            storage,
            clock,
        }
    }

    /// Uploads a file and records the bucket item.
    ///
    /// The storage upload runs first; when it fails no item record is
    /// created.
    ///
    /// # Errors
    ///
    /// Returns [`BucketServiceError::Domain`] on validation failure,
    /// [`BucketServiceError::Storage`] when the upload fails, and
    /// [`BucketServiceError::Repository`] when persistence fails.
    pub async fn upload(
        &self,
        request: UploadBucketItemRequest,
    ) -> BucketServiceResult<BucketItem> {
        let upload = FileUpload::new(request.data, request.file_name, request.content_type)?;
        let file = self.storage.put(upload).await?;

        let item = BucketItem::new(
            request.name,
            request.description,
            request.tags,
            request.uploaded_by,
            file,
            &*self.clock,
        )?;
        self.items.store(&item).await?;
        Ok(item)
    }

    /// Returns every bucket item.
    ///
    /// # Errors
    ///
    /// Returns [`BucketServiceError::Repository`] when lookup fails.
    pub async fn list_all(&self) -> BucketServiceResult<Vec<BucketItem>> {
        Ok(self.items.list_all().await?)
    }

    /// Retrieves a bucket item by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BucketServiceError::UnknownItem`] when the item does not
    /// exist and [`BucketServiceError::Repository`] when lookup fails.
    pub async fn get(&self, id: BucketItemId) -> BucketServiceResult<BucketItem> {
        self.items
            .find_by_id(id)
            .await?
            .ok_or(BucketServiceError::UnknownItem(id))
    }

    /// Deletes a bucket item and removes the stored file.
    ///
    /// The record is deleted first; a storage failure after that point
    /// surfaces as [`BucketServiceError::Storage`] with the record already
    /// gone, matching the delete-then-remove order of the original flow.
    ///
    /// # Errors
    ///
    /// Returns [`BucketServiceError::UnknownItem`] when the item does not
    /// exist, and storage or repository errors when the backends fail.
    pub async fn delete(&self, id: BucketItemId) -> BucketServiceResult<BucketItem> {
        let item = self
            .items
            .find_by_id(id)
            .await?
            .ok_or(BucketServiceError::UnknownItem(id))?;
        self.items.delete(id).await?;
        self.storage.remove(item.file()).await?;
        Ok(item)
    }
}
