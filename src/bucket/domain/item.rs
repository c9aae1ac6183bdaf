//! Bucket item aggregate root.

use super::{BucketDomainError, BucketItemId, FileRef};
use crate::directory::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Standalone uploaded file record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketItem {
    id: BucketItemId,
    name: String,
    description: Option<String>,
    tags: Vec<String>,
    uploaded_by: UserId,
    file: FileRef,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted bucket item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBucketItemData {
    /// Persisted item identifier.
    pub id: BucketItemId,
    /// Persisted item name.
    pub name: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted tags.
    pub tags: Vec<String>,
    /// Persisted uploader reference.
    pub uploaded_by: UserId,
    /// Persisted file reference.
    pub file: FileRef,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl BucketItem {
    /// Creates a bucket item for a freshly stored file.
    ///
    /// Tags are trimmed and empty entries dropped.
    ///
    /// # Errors
    ///
    /// Returns [`BucketDomainError::EmptyItemName`] when the name is empty
    /// after trimming.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        tags: Vec<String>,
        uploaded_by: UserId,
        file: FileRef,
        clock: &impl Clock,
    ) -> Result<Self, BucketDomainError> {
        let trimmed = name.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(BucketDomainError::EmptyItemName);
        }
        let normalized_tags = tags
            .into_iter()
            .map(|tag| tag.trim().to_owned())
            .filter(|tag| !tag.is_empty())
            .collect();
        let timestamp = clock.utc();

        Ok(Self {
            id: BucketItemId::new(),
            name: trimmed,
            description,
            tags: normalized_tags,
            uploaded_by,
            file,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a bucket item from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBucketItemData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            tags: data.tags,
            uploaded_by: data.uploaded_by,
            file: data.file,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the item identifier.
    #[must_use]
    pub const fn id(&self) -> BucketItemId {
        self.id
    }

    /// Returns the item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the uploader reference.
    #[must_use]
    pub const fn uploaded_by(&self) -> UserId {
        self.uploaded_by
    }

    /// Returns the stored file reference.
    #[must_use]
    pub const fn file(&self) -> &FileRef {
        &self.file
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
