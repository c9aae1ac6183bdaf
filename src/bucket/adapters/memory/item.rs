//! In-memory repository for bucket tests and in-process use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::bucket::{
    domain::{BucketItem, BucketItemId},
    ports::{BucketRepository, BucketRepositoryError, BucketRepositoryResult},
};

/// Thread-safe in-memory bucket repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBucketRepository {
    state: Arc<RwLock<HashMap<BucketItemId, BucketItem>>>,
}

impl InMemoryBucketRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> BucketRepositoryError {
    BucketRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl BucketRepository for InMemoryBucketRepository {
    async fn store(&self, item: &BucketItem) -> BucketRepositoryResult<()> {
        let mut items = self.state.write().map_err(lock_error)?;
        if items.contains_key(&item.id()) {
            return Err(BucketRepositoryError::DuplicateItem(item.id()));
        }
        items.insert(item.id(), item.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: BucketItemId) -> BucketRepositoryResult<Option<BucketItem>> {
        let items = self.state.read().map_err(lock_error)?;
        Ok(items.get(&id).cloned())
    }

    async fn list_all(&self) -> BucketRepositoryResult<Vec<BucketItem>> {
        let items = self.state.read().map_err(lock_error)?;
        Ok(items.values().cloned().collect())
    }

    async fn delete(&self, id: BucketItemId) -> BucketRepositoryResult<()> {
        let mut items = self.state.write().map_err(lock_error)?;
        items
            .remove(&id)
            .ok_or(BucketRepositoryError::NotFound(id))?;
        Ok(())
    }
}
