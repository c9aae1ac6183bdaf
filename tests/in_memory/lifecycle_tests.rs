//! In-memory integration tests for end-to-end task lifecycle transitions.

use rstest::rstest;
use taskboard::directory::{
    domain::{TaskSlot, User, UserId},
    ports::UserRepository,
};
use taskboard::task::{
    domain::{Priority, TaskEdit, TaskStatus},
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
async fn task_walks_the_full_lifecycle(backend: Backend) -> Result<(), eyre::Report> {
    let lead = registered_user(&backend, "lead@example.com", "Lena Ortiz").await;
    let dev = registered_user(&backend, "dev@example.com", "Devi Rao").await;

    let task = backend
        .coordinator
        .create(
            CreateTaskRequest::new(
                "Ship the export endpoint",
                "Expose CSV export for the report view",
                lead.id(),
                dev.id(),
            )
            .with_priority(Priority::High),
        )
        .await
        .expect("task creation should succeed");

    eyre::ensure!(task.status() == TaskStatus::Assigned, "new task starts assigned");
    eyre::ensure!(task.in_progress_date().is_none(), "no start date yet");
    let assignee = fetch_user(&backend, dev.id()).await;
    eyre::ensure!(
        assignee.slot_of(task.id()) == Some(TaskSlot::Assigned),
        "task sits in the assigned set"
    );

    let started = backend
        .coordinator
        .transition(task.id(), TaskStatus::InProgress, dev.id())
        .await
        .expect("start transition should succeed");
    eyre::ensure!(started.in_progress_date().is_some(), "start date stamped");
    let assignee_after_start = fetch_user(&backend, dev.id()).await;
    eyre::ensure!(
        assignee_after_start.slot_of(task.id()) == Some(TaskSlot::InProgress),
        "task moved to the in-progress set"
    );
    eyre::ensure!(
        !assignee_after_start.assigned().contains(&task.id()),
        "assigned set no longer holds the task"
    );

    let completed = backend
        .coordinator
        .transition(task.id(), TaskStatus::Completed, dev.id())
        .await
        .expect("completion transition should succeed");
    eyre::ensure!(completed.completion_date().is_some(), "completion date stamped");
    let assignee_after_completion = fetch_user(&backend, dev.id()).await;
    eyre::ensure!(
        assignee_after_completion.slot_of(task.id()) == Some(TaskSlot::Completed),
        "task moved to the completed set"
    );
    eyre::ensure!(
        !assignee_after_completion.in_progress().contains(&task.id()),
        "in-progress set no longer holds the task"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revisited_statuses_keep_their_first_timestamps(backend: Backend) {
    let lead = registered_user(&backend, "lead@example.com", "Lena Ortiz").await;
    let dev = registered_user(&backend, "dev@example.com", "Devi Rao").await;
    let task = backend
        .coordinator
        .create(CreateTaskRequest::new(
            "Tune the cache TTL",
            "The cache expires too aggressively",
            lead.id(),
            dev.id(),
        ))
        .await
        .expect("task creation should succeed");

    let started = backend
        .coordinator
        .transition(task.id(), TaskStatus::InProgress, dev.id())
        .await
        .expect("start transition should succeed");
    let first_start = started.in_progress_date();

    // Bounce back to assigned and start again.
    backend
        .coordinator
        .transition(task.id(), TaskStatus::Assigned, dev.id())
        .await
        .expect("revert transition should succeed");
    let restarted = backend
        .coordinator
        .transition(task.id(), TaskStatus::InProgress, dev.id())
        .await
        .expect("second start should succeed");

    assert_eq!(restarted.in_progress_date(), first_start);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_the_assignee_may_transition(backend: Backend) {
    let lead = registered_user(&backend, "lead@example.com", "Lena Ortiz").await;
    let dev = registered_user(&backend, "dev@example.com", "Devi Rao").await;
    let task = backend
        .coordinator
        .create(CreateTaskRequest::new(
            "Tune the cache TTL",
            "The cache expires too aggressively",
            lead.id(),
            dev.id(),
        ))
        .await
        .expect("task creation should succeed");

    // Not even the assigner may move someone else's task.
    let result = backend
        .coordinator
        .transition(task.id(), TaskStatus::InProgress, lead.id())
        .await;

    assert!(matches!(result, Err(LifecycleError::NotAssignee { .. })));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edits_apply_without_moving_the_lifecycle(backend: Backend) {
    let lead = registered_user(&backend, "lead@example.com", "Lena Ortiz").await;
    let dev = registered_user(&backend, "dev@example.com", "Devi Rao").await;
    let task = backend
        .coordinator
        .create(CreateTaskRequest::new(
            "Draft the postmortem",
            "Write up the outage timeline",
            lead.id(),
            dev.id(),
        ))
        .await
        .expect("task creation should succeed");

    let edited = backend
        .coordinator
        .edit(
            task.id(),
            TaskEdit::new()
                .with_name("Draft and circulate the postmortem")
                .with_priority(Priority::Low),
        )
        .await
        .expect("edit should succeed");

    assert_eq!(edited.name(), "Draft and circulate the postmortem");
    assert_eq!(edited.priority(), Priority::Low);
    assert_eq!(edited.status(), TaskStatus::Assigned);
    assert_eq!(edited.description(), "Write up the outage timeline");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archive_flag_survives_later_transitions(backend: Backend) {
    let lead = registered_user(&backend, "lead@example.com", "Lena Ortiz").await;
    let dev = registered_user(&backend, "dev@example.com", "Devi Rao").await;
    let task = backend
        .coordinator
        .create(CreateTaskRequest::new(
            "Draft the postmortem",
            "Write up the outage timeline",
            lead.id(),
            dev.id(),
        ))
        .await
        .expect("task creation should succeed");

    let archived = backend
        .coordinator
        .archive(task.id())
        .await
        .expect("archive should succeed");
    assert!(archived.is_archived());

    let completed = backend
        .coordinator
        .transition(task.id(), TaskStatus::Completed, dev.id())
        .await
        .expect("transition should succeed");
    assert!(completed.is_archived());
    assert_eq!(completed.status(), TaskStatus::Completed);
}
