//! Diesel row models for user persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Internal user identifier.
    pub id: uuid::Uuid,
    /// Email address.
    pub email: String,
    /// One-time invitation code.
    pub joining_id: String,
    /// Organization name.
    pub organization: String,
    /// Admin role flag.
    pub is_admin: bool,
    /// Full name, null until signup completes.
    pub name: Option<String>,
    /// Employee ID, null until signup completes.
    pub employee_id: Option<String>,
    /// Phone number, null until signup completes.
    pub phone_number: Option<String>,
    /// Assigned membership set payload.
    pub task_assigned: Value,
    /// In-progress membership set payload.
    pub task_in_progress: Value,
    /// Completed membership set payload.
    pub task_completed: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and update model for user records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct NewUserRow {
    /// Internal user identifier.
    pub id: uuid::Uuid,
    /// Email address.
    pub email: String,
    /// One-time invitation code.
    pub joining_id: String,
    /// Organization name.
    pub organization: String,
    /// Admin role flag.
    pub is_admin: bool,
    /// Full name, null until signup completes.
    pub name: Option<String>,
    /// Employee ID, null until signup completes.
    pub employee_id: Option<String>,
    /// Phone number, null until signup completes.
    pub phone_number: Option<String>,
    /// Assigned membership set payload.
    pub task_assigned: Value,
    /// In-progress membership set payload.
    pub task_in_progress: Value,
    /// Completed membership set payload.
    pub task_completed: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
