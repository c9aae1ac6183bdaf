//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// One-way archive flag.
    pub archived: bool,
    /// Priority.
    pub priority: String,
    /// Assigner reference, null once scrubbed.
    pub assigned_by: Option<uuid::Uuid>,
    /// Assignee reference, null once scrubbed.
    pub assigned_to: Option<uuid::Uuid>,
    /// Assignment timestamp.
    pub assigned_date: DateTime<Utc>,
    /// First-entry in-progress timestamp.
    pub in_progress_date: Option<DateTime<Utc>>,
    /// First-entry completion timestamp.
    pub completion_date: Option<DateTime<Utc>>,
    /// Attached file reference payload.
    pub attachment: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and update model for task records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// One-way archive flag.
    pub archived: bool,
    /// Priority.
    pub priority: String,
    /// Assigner reference, null once scrubbed.
    pub assigned_by: Option<uuid::Uuid>,
    /// Assignee reference, null once scrubbed.
    pub assigned_to: Option<uuid::Uuid>,
    /// Assignment timestamp.
    pub assigned_date: DateTime<Utc>,
    /// First-entry in-progress timestamp.
    pub in_progress_date: Option<DateTime<Utc>>,
    /// First-entry completion timestamp.
    pub completion_date: Option<DateTime<Utc>>,
    /// Attached file reference payload.
    pub attachment: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
