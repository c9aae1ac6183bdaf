//! Lifecycle coordinator: the only writer of task status and membership
//! sets.

use crate::bucket::domain::FileRef;
use crate::directory::{
    domain::{TaskSlot, User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use crate::task::{
    domain::{NewTask, Priority, Task, TaskDomainError, TaskEdit, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    name: String,
    description: String,
    assigned_by: UserId,
    assigned_to: UserId,
    priority: Option<Priority>,
    attachment: Option<FileRef>,
}

impl CreateTaskRequest {
    /// Creates a request with required fields.
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
            priority: None,
            attachment: None,
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets an attached file reference.
    #[must_use]
    pub fn with_attachment(mut self, attachment: FileRef) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// Service-level errors for lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// No task exists with the given identifier.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    /// The requested assignee does not exist.
    #[error("unknown assignee: {0}")]
    UnknownAssignee(UserId),

    /// The referenced user does not exist.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    /// The acting user is not the task's assignee.
    #[error("user {acting_user} is not the assignee of task {task_id}")]
    NotAssignee {
        /// The task being transitioned.
        task_id: TaskId,
        /// The caller that attempted the transition.
        acting_user: UserId,
    },

    /// The task has no assignee (scrubbed by user deletion).
    #[error("task {0} has no assignee")]
    Unassigned(TaskId),

    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// User repository operation failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
}

/// Result type for lifecycle coordinator operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Task lifecycle coordinator.
///
/// Enforces that a task's status and the assignee's three membership sets
/// never disagree. Each mutation performs at most one write per record;
/// the task write and the user write are sequential, not transactional, so
/// a crash between them leaves a documented inconsistency window that the
/// underlying per-record atomicity does not close.
#[derive(Clone)]
pub struct LifecycleCoordinator<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<T, U, C> LifecycleCoordinator<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new coordinator over injected store handles.
    #[must_use]
    pub const fn new(tasks: Arc<T>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            users,
            clock,
        }
    }

    /// Creates a task at [`TaskStatus::Assigned`] and places its ID in the
    /// assignee's `assigned` set.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::UnknownAssignee`] when the assignee does
    /// not exist (no task or user mutation occurs),
    /// [`LifecycleError::Domain`] on validation failure, and repository
    /// errors when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> LifecycleResult<Task> {
        let mut assignee = self
            .users
            .find_by_id(request.assigned_to)
            .await?
            .ok_or(LifecycleError::UnknownAssignee(request.assigned_to))?;

        let mut spec = NewTask::new(
            request.name,
            request.description,
            request.assigned_by,
            request.assigned_to,
        );
        if let Some(priority) = request.priority {
            spec = spec.with_priority(priority);
        }
        if let Some(attachment) = request.attachment {
            spec = spec.with_attachment(attachment);
        }

        let task = Task::new(spec, &*self.clock)?;
        self.tasks.store(&task).await?;

        assignee.place_task(task.id(), TaskSlot::Assigned, &*self.clock);
        self.users.update(&assignee).await?;
        Ok(task)
    }

    /// Moves a task to the target status and mirrors the move into the
    /// assignee's membership sets.
    ///
    /// The list owner is the task's actual assignee; a caller that is not
    /// the assignee is rejected before any write. Postcondition: exactly
    /// one membership set contains the task ID and it matches the task
    /// status.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::UnknownTask`] when the task does not
    /// exist (no user record is touched),
    /// [`LifecycleError::NotAssignee`] when the caller is not the
    /// assignee, [`LifecycleError::Unassigned`] when the assignee was
    /// scrubbed, and repository errors when persistence fails.
    pub async fn transition(
        &self,
        task_id: TaskId,
        target: TaskStatus,
        acting_user: UserId,
    ) -> LifecycleResult<Task> {
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(LifecycleError::UnknownTask(task_id))?;
        let assignee_id = task
            .assigned_to()
            .ok_or(LifecycleError::Unassigned(task_id))?;
        if acting_user != assignee_id {
            return Err(LifecycleError::NotAssignee {
                task_id,
                acting_user,
            });
        }

        // Resolve the assignee before the first write so a missing user
        // fails the call with no mutation at all.
        let mut assignee = self
            .users
            .find_by_id(assignee_id)
            .await?
            .ok_or(LifecycleError::UnknownUser(assignee_id))?;

        task.advance_to(target, &*self.clock);
        self.tasks.update(&task).await?;

        assignee.place_task(task_id, TaskSlot::from(target), &*self.clock);
        self.users.update(&assignee).await?;
        Ok(task)
    }

    /// Applies a partial edit; only fields carried by the edit are
    /// written. Reassignment migrates the task ID between the old and new
    /// assignees' membership sets, preserving the current status slot.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::UnknownTask`] when the task does not
    /// exist, [`LifecycleError::UnknownAssignee`] when a requested new
    /// assignee does not exist (nothing is written), and domain or
    /// repository errors on validation and persistence failures.
    pub async fn edit(&self, task_id: TaskId, edit: TaskEdit) -> LifecycleResult<Task> {
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(LifecycleError::UnknownTask(task_id))?;

        match edit.reassign_to() {
            Some(new_assignee_id) => {
                let new_assignee = self
                    .users
                    .find_by_id(new_assignee_id)
                    .await?
                    .ok_or(LifecycleError::UnknownAssignee(new_assignee_id))?;
                task.apply_edit(&edit, &*self.clock)?;
                self.reassign(&mut task, new_assignee).await?;
            }
            None => {
                task.apply_edit(&edit, &*self.clock)?;
                self.tasks.update(&task).await?;
            }
        }
        Ok(task)
    }

    /// Sets the task's one-way archive flag. Membership sets are not
    /// touched; archival is orthogonal to lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::UnknownTask`] when the task does not
    /// exist and repository errors when persistence fails.
    pub async fn archive(&self, task_id: TaskId) -> LifecycleResult<Task> {
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(LifecycleError::UnknownTask(task_id))?;
        task.archive(&*self.clock);
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Deletes a task and scrubs its ID from the assignee's membership
    /// sets.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::UnknownTask`] when the task does not
    /// exist and repository errors when persistence fails.
    pub async fn delete(&self, task_id: TaskId) -> LifecycleResult<()> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(LifecycleError::UnknownTask(task_id))?;
        self.tasks.delete(task_id).await?;

        if let Some(assignee_id) = task.assigned_to() {
            if let Some(mut assignee) = self.users.find_by_id(assignee_id).await? {
                assignee.remove_task(task_id, &*self.clock);
                self.users.update(&assignee).await?;
            }
        }
        Ok(())
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::UnknownTask`] when the task does not
    /// exist and repository errors when lookup fails.
    pub async fn get(&self, task_id: TaskId) -> LifecycleResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(LifecycleError::UnknownTask(task_id))
    }

    /// Deletes a user and scrubs the user's ID from the
    /// `assigned_by`/`assigned_to` references of every task the user
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::UnknownUser`] when the user does not
    /// exist and repository errors when persistence fails.
    pub async fn remove_user(&self, user_id: UserId) -> LifecycleResult<()> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(LifecycleError::UnknownUser(user_id));
        }

        let affected = self.tasks.find_by_participant(user_id).await?;
        for mut task in affected {
            if task.scrub_user(user_id, &*self.clock) {
                self.tasks.update(&task).await?;
            }
        }
        self.users.delete(user_id).await?;
        Ok(())
    }

    /// Migrates a task to a new assignee, updating both users' sets.
    async fn reassign(&self, task: &mut Task, mut new_assignee: User) -> LifecycleResult<()> {
        let old_assignee_id = task.assigned_to();
        task.reassign_to(new_assignee.id(), &*self.clock);
        self.tasks.update(task).await?;

        if let Some(old_id) = old_assignee_id {
            if old_id != new_assignee.id() {
                if let Some(mut old_assignee) = self.users.find_by_id(old_id).await? {
                    old_assignee.remove_task(task.id(), &*self.clock);
                    self.users.update(&old_assignee).await?;
                }
            }
        }

        new_assignee.place_task(task.id(), TaskSlot::from(task.status()), &*self.clock);
        self.users.update(&new_assignee).await?;
        Ok(())
    }
}
