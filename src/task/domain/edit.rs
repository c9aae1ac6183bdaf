//! Presence-tagged partial update for task records.

use super::Priority;
use crate::bucket::domain::FileRef;
use crate::directory::domain::UserId;

/// Partial task update.
///
/// Only fields carried as `Some` are written; omitted fields are left
/// untouched. The attachment slot is doubly tagged so `Some(None)` clears
/// the attachment while `None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    name: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    attachment: Option<Option<FileRef>>,
    reassign_to: Option<UserId>,
}

impl TaskEdit {
    /// Creates an empty edit that touches nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new task name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a new task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a new priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the attachment.
    #[must_use]
    pub fn with_attachment(mut self, attachment: FileRef) -> Self {
        self.attachment = Some(Some(attachment));
        self
    }

    /// Clears the attachment.
    #[must_use]
    pub fn clearing_attachment(mut self) -> Self {
        self.attachment = Some(None);
        self
    }

    /// Reassigns the task to another user.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.reassign_to = Some(assignee);
        self
    }

    /// Returns the pending name, if supplied.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the pending description, if supplied.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the pending priority, if supplied.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the pending attachment slot, if supplied.
    ///
    /// The outer `Option` is presence; the inner is the new value, where
    /// `None` clears the attachment.
    #[must_use]
    pub const fn attachment(&self) -> Option<Option<&FileRef>> {
        match &self.attachment {
            None => None,
            Some(inner) => Some(inner.as_ref()),
        }
    }

    /// Returns the pending assignee, if supplied.
    #[must_use]
    pub const fn reassign_to(&self) -> Option<UserId> {
        self.reassign_to
    }

    /// Returns whether the edit carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.attachment.is_none()
            && self.reassign_to.is_none()
    }
}
