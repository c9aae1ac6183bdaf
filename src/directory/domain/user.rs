//! User aggregate root and task membership bookkeeping.

use super::{EmailAddress, EmployeeId, JoiningId, UserDomainError, UserId};
use crate::task::domain::{TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One of a user's three task membership sets, named after the lifecycle
/// status it mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSlot {
    /// Tasks assigned to the user but not yet started.
    Assigned,
    /// Tasks the user is currently working on.
    InProgress,
    /// Tasks the user has completed.
    Completed,
}

impl From<TaskStatus> for TaskSlot {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Assigned => Self::Assigned,
            TaskStatus::InProgress => Self::InProgress,
            TaskStatus::Completed => Self::Completed,
        }
    }
}

/// Fields populated when a user completes signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    name: String,
    employee_id: EmployeeId,
    phone_number: String,
}

impl Registration {
    /// Creates a validated registration payload.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyName`] or
    /// [`UserDomainError::EmptyPhoneNumber`] when the trimmed fields are
    /// empty.
    pub fn new(
        name: impl Into<String>,
        employee_id: EmployeeId,
        phone_number: impl Into<String>,
    ) -> Result<Self, UserDomainError> {
        let trimmed_name = name.into().trim().to_owned();
        if trimmed_name.is_empty() {
            return Err(UserDomainError::EmptyName);
        }
        let trimmed_phone = phone_number.into().trim().to_owned();
        if trimmed_phone.is_empty() {
            return Err(UserDomainError::EmptyPhoneNumber);
        }
        Ok(Self {
            name: trimmed_name,
            employee_id,
            phone_number: trimmed_phone,
        })
    }

    /// Returns the user's full name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the assigned employee ID.
    #[must_use]
    pub const fn employee_id(&self) -> &EmployeeId {
        &self.employee_id
    }

    /// Returns the phone number.
    #[must_use]
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }
}

/// User aggregate root.
///
/// A task identifier appears in at most one of the three membership sets
/// at any time. The invariant holds by construction: [`User::place_task`]
/// removes the identifier from every set before inserting it into the
/// target, and [`User::remove_task`] clears it everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    joining_id: JoiningId,
    organization: String,
    is_admin: bool,
    registration: Option<Registration>,
    assigned: BTreeSet<TaskId>,
    in_progress: BTreeSet<TaskId>,
    completed: BTreeSet<TaskId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted joining ID.
    pub joining_id: JoiningId,
    /// Persisted organization name.
    pub organization: String,
    /// Persisted admin flag.
    pub is_admin: bool,
    /// Persisted registration fields, absent for provisional users.
    pub registration: Option<Registration>,
    /// Persisted assigned membership set.
    pub assigned: BTreeSet<TaskId>,
    /// Persisted in-progress membership set.
    pub in_progress: BTreeSet<TaskId>,
    /// Persisted completed membership set.
    pub completed: BTreeSet<TaskId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a provisional user from an invitation.
    ///
    /// The user carries only the invitation fields until
    /// [`Self::complete_registration`] fills in the rest.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyOrganization`] when the organization
    /// is empty after trimming.
    pub fn invited(
        email: EmailAddress,
        joining_id: JoiningId,
        organization: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, UserDomainError> {
        let org = organization.into().trim().to_owned();
        if org.is_empty() {
            return Err(UserDomainError::EmptyOrganization);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: UserId::new(),
            email,
            joining_id,
            organization: org,
            is_admin: false,
            registration: None,
            assigned: BTreeSet::new(),
            in_progress: BTreeSet::new(),
            completed: BTreeSet::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a user from persisted storage.
    ///
    /// Membership sets are deduplicated across slots on load (assigned
    /// wins over in-progress, which wins over completed) so a corrupt row
    /// cannot violate the at-most-one-set invariant in memory.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        let assigned = data.assigned;
        let in_progress: BTreeSet<TaskId> = data
            .in_progress
            .into_iter()
            .filter(|task_id| !assigned.contains(task_id))
            .collect();
        let completed: BTreeSet<TaskId> = data
            .completed
            .into_iter()
            .filter(|task_id| !assigned.contains(task_id) && !in_progress.contains(task_id))
            .collect();

        Self {
            id: data.id,
            email: data.email,
            joining_id: data.joining_id,
            organization: data.organization,
            is_admin: data.is_admin,
            registration: data.registration,
            assigned,
            in_progress,
            completed,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the joining ID.
    #[must_use]
    pub const fn joining_id(&self) -> &JoiningId {
        &self.joining_id
    }

    /// Returns the organization name.
    #[must_use]
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Returns whether the user holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Returns the registration fields, if signup has completed.
    #[must_use]
    pub const fn registration(&self) -> Option<&Registration> {
        self.registration.as_ref()
    }

    /// Returns whether signup has completed for this user.
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        self.registration.is_some()
    }

    /// Returns the assigned membership set.
    #[must_use]
    pub const fn assigned(&self) -> &BTreeSet<TaskId> {
        &self.assigned
    }

    /// Returns the in-progress membership set.
    #[must_use]
    pub const fn in_progress(&self) -> &BTreeSet<TaskId> {
        &self.in_progress
    }

    /// Returns the completed membership set.
    #[must_use]
    pub const fn completed(&self) -> &BTreeSet<TaskId> {
        &self.completed
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

    /// Returns which membership set currently holds the task, if any.
    #[must_use]
    pub fn slot_of(&self, task_id: TaskId) -> Option<TaskSlot> {
        if self.assigned.contains(&task_id) {
            Some(TaskSlot::Assigned)
        } else if self.in_progress.contains(&task_id) {
            Some(TaskSlot::InProgress)
        } else if self.completed.contains(&task_id) {
            Some(TaskSlot::Completed)
        } else {
            None
        }
    }

    /// Completes signup with the supplied registration fields.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::AlreadyRegistered`] when registration has
    /// already completed.
    pub fn complete_registration(
        &mut self,
        registration: Registration,
        clock: &impl Clock,
    ) -> Result<(), UserDomainError> {
        if self.registration.is_some() {
            return Err(UserDomainError::AlreadyRegistered(self.id));
        }
        self.registration = Some(registration);
        self.touch(clock);
        Ok(())
    }

    /// Grants the admin role. Idempotent.
    pub fn grant_admin(&mut self, clock: &impl Clock) {
        self.is_admin = true;
        self.touch(clock);
    }

    /// Places a task identifier into the given membership set, removing it
    /// from the other two. Idempotent under set semantics.
    pub fn place_task(&mut self, task_id: TaskId, slot: TaskSlot, clock: &impl Clock) {
        self.assigned.remove(&task_id);
        self.in_progress.remove(&task_id);
        self.completed.remove(&task_id);
        match slot {
            TaskSlot::Assigned => self.assigned.insert(task_id),
            TaskSlot::InProgress => self.in_progress.insert(task_id),
            TaskSlot::Completed => self.completed.insert(task_id),
        };
        self.touch(clock);
    }

    /// Removes a task identifier from every membership set.
    pub fn remove_task(&mut self, task_id: TaskId, clock: &impl Clock) {
        self.assigned.remove(&task_id);
        self.in_progress.remove(&task_id);
        self.completed.remove(&task_id);
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
