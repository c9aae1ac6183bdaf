//! Diesel row models for bucket item persistence.

use super::schema::bucket_items;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for bucket item records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bucket_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BucketItemRow {
    /// Internal item identifier.
    pub id: uuid::Uuid,
    /// Item name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Tags payload.
    pub tags: Value,
    /// Uploader reference.
    pub uploaded_by: uuid::Uuid,
    /// Stored file reference payload.
    pub file: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for bucket item records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bucket_items)]
pub struct NewBucketItemRow {
    /// Internal item identifier.
    pub id: uuid::Uuid,
    /// Item name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Tags payload.
    pub tags: Value,
    /// Uploader reference.
    pub uploaded_by: uuid::Uuid,
    /// Stored file reference payload.
    pub file: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
