//! In-memory integration tests for membership agreement and scrubbing.

use rstest::rstest;
use taskboard::directory::{
    domain::{TaskSlot, User, UserId},
    ports::UserRepository,
};
use taskboard::task::{
    domain::{TaskEdit, TaskStatus},
    services::{CreateTaskRequest, LifecycleError},
};

use super::helpers::{Backend, backend, registered_user};

async fn fetch_user(backend: &Backend, id: UserId) -> User {
    backend
        .users
        .find_by_id(id)
        .await
        .expect("user lookup should succeed")
        .expect("user exists")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassignment_migrates_the_task_between_users(backend: Backend) -> Result<(), eyre::Report> {
    let lead = registered_user(&backend, "lead@example.com", "Lena Ortiz").await;
    let first = registered_user(&backend, "first@example.com", "Devi Rao").await;
    let second = registered_user(&backend, "second@example.com", "Omar Haddad").await;

    let task = backend
        .coordinator
        .create(CreateTaskRequest::new(
            "Migrate the billing webhook",
            "Move the webhook onto the new gateway",
            lead.id(),
            first.id(),
        ))
        .await
        .expect("task creation should succeed");
    backend
        .coordinator
        .transition(task.id(), TaskStatus::InProgress, first.id())
        .await
        .expect("start transition should succeed");

    let reassigned = backend
        .coordinator
        .edit(task.id(), TaskEdit::new().with_assignee(second.id()))
        .await
        .expect("reassignment should succeed");

    eyre::ensure!(
        reassigned.assigned_to() == Some(second.id()),
        "task points at the new assignee"
    );
    let old_assignee = fetch_user(&backend, first.id()).await;
    eyre::ensure!(
        old_assignee.slot_of(task.id()).is_none(),
        "old assignee's sets no longer hold the task"
    );
    let new_assignee = fetch_user(&backend, second.id()).await;
    eyre::ensure!(
        new_assignee.slot_of(task.id()) == Some(TaskSlot::InProgress),
        "new assignee holds the task in the slot matching its status"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassignment_to_unknown_user_changes_nothing(backend: Backend) {
    let lead = registered_user(&backend, "lead@example.com", "Lena Ortiz").await;
    let dev = registered_user(&backend, "dev@example.com", "Devi Rao").await;
    let task = backend
        .coordinator
        .create(CreateTaskRequest::new(
            "Migrate the billing webhook",
            "Move the webhook onto the new gateway",
            lead.id(),
            dev.id(),
        ))
        .await
        .expect("task creation should succeed");

    let result = backend
        .coordinator
        .edit(task.id(), TaskEdit::new().with_assignee(UserId::new()))
        .await;

    assert!(matches!(result, Err(LifecycleError::UnknownAssignee(_))));
    let unchanged = backend
        .coordinator
        .get(task.id())
        .await
        .expect("task lookup should succeed");
    assert_eq!(unchanged.assigned_to(), Some(dev.id()));
    let assignee = fetch_user(&backend, dev.id()).await;
    assert_eq!(assignee.slot_of(task.id()), Some(TaskSlot::Assigned));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_status_cycle_leaves_the_task_in_one_set(backend: Backend) {
    let lead = registered_user(&backend, "lead@example.com", "Lena Ortiz").await;
    let dev = registered_user(&backend, "dev@example.com", "Devi Rao").await;
    let task = backend
        .coordinator
        .create(CreateTaskRequest::new(
            "Verify the backup restore",
            "Run a restore drill against last night's backup",
            lead.id(),
            dev.id(),
        ))
        .await
        .expect("task creation should succeed");

    for target in [
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Assigned,
    ] {
        backend
            .coordinator
            .transition(task.id(), target, dev.id())
            .await
            .expect("transition should succeed");
    }

    let assignee = fetch_user(&backend, dev.id()).await;
    assert_eq!(assignee.slot_of(task.id()), Some(TaskSlot::Assigned));
    assert!(assignee.in_progress().is_empty());
    assert!(assignee.completed().is_empty());
    let stored = backend
        .coordinator
        .get(task.id())
        .await
        .expect("task lookup should succeed");
    assert_eq!(stored.status(), TaskStatus::Assigned);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_clears_every_membership_set(backend: Backend) {
    let lead = registered_user(&backend, "lead@example.com", "Lena Ortiz").await;
    let dev = registered_user(&backend, "dev@example.com", "Devi Rao").await;
    let task = backend
        .coordinator
        .create(CreateTaskRequest::new(
            "Close out the audit findings",
            "Address the remaining audit items",
            lead.id(),
            dev.id(),
        ))
        .await
        .expect("task creation should succeed");
    backend
        .coordinator
        .transition(task.id(), TaskStatus::Completed, dev.id())
        .await
        .expect("completion transition should succeed");

    backend
        .coordinator
        .delete(task.id())
        .await
        .expect("delete should succeed");

    let assignee = fetch_user(&backend, dev.id()).await;
    assert_eq!(assignee.slot_of(task.id()), None);
    assert!(assignee.completed().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_a_user_scrubs_every_task_they_touched(backend: Backend) {
    let lead = registered_user(&backend, "lead@example.com", "Lena Ortiz").await;
    let dev = registered_user(&backend, "dev@example.com", "Devi Rao").await;
    let authored = backend
        .coordinator
        .create(CreateTaskRequest::new(
            "Rotate the API keys",
            "Replace keys issued before the incident",
            lead.id(),
            dev.id(),
        ))
        .await
        .expect("task creation should succeed");
    let self_assigned = backend
        .coordinator
        .create(CreateTaskRequest::new(
            "Review the on-call runbook",
            "The runbook predates the new paging setup",
            lead.id(),
            lead.id(),
        ))
        .await
        .expect("task creation should succeed");

    backend
        .coordinator
        .remove_user(lead.id())
        .await
        .expect("user removal should succeed");

    let authored_after = backend
        .coordinator
        .get(authored.id())
        .await
        .expect("task lookup should succeed");
    assert_eq!(authored_after.assigned_by(), None);
    assert_eq!(authored_after.assigned_to(), Some(dev.id()));

    let self_assigned_after = backend
        .coordinator
        .get(self_assigned.id())
        .await
        .expect("task lookup should succeed");
    assert_eq!(self_assigned_after.assigned_by(), None);
    assert_eq!(self_assigned_after.assigned_to(), None);

    assert!(
        backend
            .users
            .find_by_id(lead.id())
            .await
            .expect("lookup should succeed")
            .is_none()
    );
}
