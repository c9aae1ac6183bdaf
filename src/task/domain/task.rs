//! Task aggregate root.

use super::{Priority, TaskDomainError, TaskEdit, TaskId, TaskStatus};
use crate::bucket::domain::FileRef;
use crate::directory::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated inputs for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    name: String,
    description: String,
    assigned_by: UserId,
    assigned_to: UserId,
    priority: Priority,
    attachment: Option<FileRef>,
}

impl NewTask {
    /// Creates a task specification with required fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        assigned_by: UserId,
        assigned_to: UserId,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            assigned_by,
            assigned_to,
            priority: Priority::default(),
            attachment: None,
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets an attached file reference.
    #[must_use]
    pub fn with_attachment(mut self, attachment: FileRef) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Returns the assignee reference.
    #[must_use]
    pub const fn assigned_to(&self) -> UserId {
        self.assigned_to
    }
}

/// Task aggregate root.
///
/// Lifecycle timestamps (`assigned_date`, `in_progress_date`,
/// `completion_date`) are each set exactly once, the first time the task
/// enters the corresponding status; revisiting a status does not re-stamp
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: String,
    description: String,
    status: TaskStatus,
    archived: bool,
    priority: Priority,
    assigned_by: Option<UserId>,
    assigned_to: Option<UserId>,
    assigned_date: DateTime<Utc>,
    in_progress_date: Option<DateTime<Utc>>,
    completion_date: Option<DateTime<Utc>>,
    attachment: Option<FileRef>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted task name.
    pub name: String,
    /// Persisted task description.
    pub description: String,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted archive flag.
    pub archived: bool,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted assigner reference, if not scrubbed.
    pub assigned_by: Option<UserId>,
    /// Persisted assignee reference, if not scrubbed.
    pub assigned_to: Option<UserId>,
    /// Persisted assignment timestamp.
    pub assigned_date: DateTime<Utc>,
    /// Persisted first-entry in-progress timestamp, if any.
    pub in_progress_date: Option<DateTime<Utc>>,
    /// Persisted first-entry completion timestamp, if any.
    pub completion_date: Option<DateTime<Utc>>,
    /// Persisted attachment reference, if any.
    pub attachment: Option<FileRef>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task at [`TaskStatus::Assigned`] with the assignment
    /// timestamp stamped from the clock.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyName`] or
    /// [`TaskDomainError::EmptyDescription`] when the trimmed fields are
    /// empty.
    pub fn new(spec: NewTask, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let name = validated_name(spec.name)?;
        let description = validated_description(spec.description)?;
        let timestamp = clock.utc();

        Ok(Self {
            id: TaskId::new(),
            name,
            description,
            status: TaskStatus::Assigned,
            archived: false,
            priority: spec.priority,
            assigned_by: Some(spec.assigned_by),
            assigned_to: Some(spec.assigned_to),
            assigned_date: timestamp,
            in_progress_date: None,
            completion_date: None,
            attachment: spec.attachment,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            status: data.status,
            archived: data.archived,
            priority: data.priority,
            assigned_by: data.assigned_by,
            assigned_to: data.assigned_to,
            assigned_date: data.assigned_date,
            in_progress_date: data.in_progress_date,
            completion_date: data.completion_date,
            attachment: data.attachment,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns whether the task has been archived.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.archived
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the assigner reference, if not scrubbed.
    #[must_use]
    pub const fn assigned_by(&self) -> Option<UserId> {
        self.assigned_by
    }

    /// Returns the assignee reference, if not scrubbed.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the assignment timestamp.
    #[must_use]
    pub const fn assigned_date(&self) -> DateTime<Utc> {
        self.assigned_date
    }

    /// Returns the first-entry in-progress timestamp, if set.
    #[must_use]
    pub const fn in_progress_date(&self) -> Option<DateTime<Utc>> {
        self.in_progress_date
    }

    /// Returns the first-entry completion timestamp, if set.
    #[must_use]
    pub const fn completion_date(&self) -> Option<DateTime<Utc>> {
        self.completion_date
    }

    /// Returns the attached file reference, if any.
    #[must_use]
    pub const fn attachment(&self) -> Option<&FileRef> {
        self.attachment.as_ref()
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

    /// Moves the task to the given status, stamping the first-entry
    /// timestamp when the status is entered for the first time.
    ///
    /// Self-transitions are permitted and do not re-stamp timestamps.
    pub fn advance_to(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        let timestamp = clock.utc();
        match status {
            TaskStatus::Assigned => {}
            TaskStatus::InProgress => {
                if self.in_progress_date.is_none() {
                    self.in_progress_date = Some(timestamp);
                }
            }
            TaskStatus::Completed => {
                if self.completion_date.is_none() {
                    self.completion_date = Some(timestamp);
                }
            }
        }
        self.updated_at = timestamp;
    }

    /// Sets the one-way archive flag. No un-archive is exposed.
    pub fn archive(&mut self, clock: &impl Clock) {
        self.archived = true;
        self.touch(clock);
    }

    /// Applies the non-assignment fields of a partial edit.
    ///
    /// Reassignment is handled by the lifecycle coordinator because it
    /// must migrate membership sets as well.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyName`] or
    /// [`TaskDomainError::EmptyDescription`] when a supplied field fails
    /// validation; nothing is applied on error.
    pub fn apply_edit(&mut self, edit: &TaskEdit, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let validated = edit
            .name()
            .map(|name| validated_name(name.to_owned()))
            .transpose()?;
        let validated_desc = edit
            .description()
            .map(|description| validated_description(description.to_owned()))
            .transpose()?;

        if let Some(name) = validated {
            self.name = name;
        }
        if let Some(description) = validated_desc {
            self.description = description;
        }
        if let Some(priority) = edit.priority() {
            self.priority = priority;
        }
        if let Some(attachment) = edit.attachment() {
            self.attachment = attachment.cloned();
        }
        self.touch(clock);
        Ok(())
    }

    /// Points the task at a new assignee.
    pub fn reassign_to(&mut self, assignee: UserId, clock: &impl Clock) {
        self.assigned_to = Some(assignee);
        self.touch(clock);
    }

    /// Clears any assigner/assignee reference matching the given user.
    ///
    /// Returns whether a reference was cleared.
    pub fn scrub_user(&mut self, user_id: UserId, clock: &impl Clock) -> bool {
        let mut changed = false;
        if self.assigned_by == Some(user_id) {
            self.assigned_by = None;
            changed = true;
        }
        if self.assigned_to == Some(user_id) {
            self.assigned_to = None;
            changed = true;
        }
        if changed {
            self.touch(clock);
        }
        changed
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validated_name(name: String) -> Result<String, TaskDomainError> {
    let trimmed = name.trim().to_owned();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyName);
    }
    Ok(trimmed)
}

fn validated_description(description: String) -> Result<String, TaskDomainError> {
    let trimmed = description.trim().to_owned();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyDescription);
    }
    Ok(trimmed)
}
