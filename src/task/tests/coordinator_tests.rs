//! Coordinator tests for status/membership agreement and scrubbing.

use std::sync::Arc;

use crate::directory::{
    adapters::memory::InMemoryUserRepository,
    domain::{EmailAddress, JoiningId, TaskSlot, User, UserId},
    ports::UserRepository,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskId, TaskStatus},
    services::{CreateTaskRequest, LifecycleCoordinator, LifecycleError},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestCoordinator =
    LifecycleCoordinator<InMemoryTaskRepository, InMemoryUserRepository, DefaultClock>;

struct Harness {
    coordinator: TestCoordinator,
    users: Arc<InMemoryUserRepository>,
}

#[fixture]
fn harness() -> Harness {
    let users = Arc::new(InMemoryUserRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    Harness {
        coordinator: LifecycleCoordinator::new(tasks, Arc::clone(&users), Arc::new(DefaultClock)),
        users,
    }
}

async fn seed_user(users: &InMemoryUserRepository, email: &str) -> User {
    let address = EmailAddress::new(email).expect("valid email");
    let user = User::invited(address, JoiningId::generate(), "teams", &DefaultClock)
        .expect("valid invitation");
    users.store(&user).await.expect("user store should succeed");
    user
}

async fn fetch_user(users: &InMemoryUserRepository, id: UserId) -> User {
    users
        .find_by_id(id)
        .await
        .expect("user lookup should succeed")
        .expect("user exists")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_places_task_in_assignee_assigned_set(harness: Harness) {
    let assigner = seed_user(&harness.users, "lead@example.com").await;
    let assignee = seed_user(&harness.users, "dev@example.com").await;

    let task = harness
        .coordinator
        .create(CreateTaskRequest::new(
            "Write release notes",
            "Summarize the changes since 1.4",
            assigner.id(),
            assignee.id(),
        ))
        .await
        .expect("task creation should succeed");

    assert_eq!(task.status(), TaskStatus::Assigned);
    let stored = fetch_user(&harness.users, assignee.id()).await;
    assert_eq!(stored.slot_of(task.id()), Some(TaskSlot::Assigned));
    // The assigner's sets are untouched.
    let lead = fetch_user(&harness.users, assigner.id()).await;
    assert_eq!(lead.slot_of(task.id()), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_with_unknown_assignee_writes_nothing(harness: Harness) {
    let assigner = seed_user(&harness.users, "lead@example.com").await;
    let ghost = UserId::new();

    let result = harness
        .coordinator
        .create(CreateTaskRequest::new(
            "Write release notes",
            "Summarize the changes since 1.4",
            assigner.id(),
            ghost,
        ))
        .await;

    assert!(matches!(result, Err(LifecycleError::UnknownAssignee(id)) if id == ghost));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transition_moves_task_between_membership_sets(harness: Harness) {
    let assigner = seed_user(&harness.users, "lead@example.com").await;
    let assignee = seed_user(&harness.users, "dev@example.com").await;
    let task = harness
        .coordinator
        .create(CreateTaskRequest::new(
            "Fix flaky retry test",
            "The retry test fails under load",
            assigner.id(),
            assignee.id(),
        ))
        .await
        .expect("task creation should succeed");

    let updated = harness
        .coordinator
        .transition(task.id(), TaskStatus::InProgress, assignee.id())
        .await
        .expect("transition should succeed");

    assert_eq!(updated.status(), TaskStatus::InProgress);
    let stored = fetch_user(&harness.users, assignee.id()).await;
    assert_eq!(stored.slot_of(task.id()), Some(TaskSlot::InProgress));
    assert!(!stored.assigned().contains(&task.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transition_rejects_caller_who_is_not_the_assignee(harness: Harness) {
    let assigner = seed_user(&harness.users, "lead@example.com").await;
    let assignee = seed_user(&harness.users, "dev@example.com").await;
    let bystander = seed_user(&harness.users, "other@example.com").await;
    let task = harness
        .coordinator
        .create(CreateTaskRequest::new(
            "Fix flaky retry test",
            "The retry test fails under load",
            assigner.id(),
            assignee.id(),
        ))
        .await
        .expect("task creation should succeed");

    let result = harness
        .coordinator
        .transition(task.id(), TaskStatus::Completed, bystander.id())
        .await;

    assert!(matches!(
        result,
        Err(LifecycleError::NotAssignee { task_id, acting_user })
            if task_id == task.id() && acting_user == bystander.id()
    ));
    // Nothing moved.
    let stored = harness
        .coordinator
        .get(task.id())
        .await
        .expect("task lookup should succeed");
    assert_eq!(stored.status(), TaskStatus::Assigned);
    let dev = fetch_user(&harness.users, assignee.id()).await;
    assert_eq!(dev.slot_of(task.id()), Some(TaskSlot::Assigned));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transition_rejects_unknown_task(harness: Harness) {
    let assignee = seed_user(&harness.users, "dev@example.com").await;
    let result = harness
        .coordinator
        .transition(TaskId::new(), TaskStatus::InProgress, assignee.id())
        .await;

    assert!(matches!(result, Err(LifecycleError::UnknownTask(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_scrubs_assignee_membership_sets(harness: Harness) {
    let assigner = seed_user(&harness.users, "lead@example.com").await;
    let assignee = seed_user(&harness.users, "dev@example.com").await;
    let task = harness
        .coordinator
        .create(CreateTaskRequest::new(
            "Prune stale branches",
            "Remove branches merged before June",
            assigner.id(),
            assignee.id(),
        ))
        .await
        .expect("task creation should succeed");

    harness
        .coordinator
        .delete(task.id())
        .await
        .expect("delete should succeed");

    let stored = fetch_user(&harness.users, assignee.id()).await;
    assert_eq!(stored.slot_of(task.id()), None);
    let result = harness.coordinator.get(task.id()).await;
    assert!(matches!(result, Err(LifecycleError::UnknownTask(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_user_scrubs_references_from_touched_tasks(harness: Harness) {
    let assigner = seed_user(&harness.users, "lead@example.com").await;
    let assignee = seed_user(&harness.users, "dev@example.com").await;
    let authored = harness
        .coordinator
        .create(CreateTaskRequest::new(
            "Prepare demo environment",
            "Stand up a demo tenant",
            assigner.id(),
            assignee.id(),
        ))
        .await
        .expect("task creation should succeed");

    harness
        .coordinator
        .remove_user(assigner.id())
        .await
        .expect("user removal should succeed");

    assert!(
        harness
            .users
            .find_by_id(assigner.id())
            .await
            .expect("lookup should succeed")
            .is_none()
    );
    let scrubbed = harness
        .coordinator
        .get(authored.id())
        .await
        .expect("task lookup should succeed");
    assert_eq!(scrubbed.assigned_by(), None);
    assert_eq!(scrubbed.assigned_to(), Some(assignee.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_user_rejects_unknown_user(harness: Harness) {
    let result = harness.coordinator.remove_user(UserId::new()).await;
    assert!(matches!(result, Err(LifecycleError::UnknownUser(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transition_of_scrubbed_task_reports_unassigned(harness: Harness) {
    let assigner = seed_user(&harness.users, "lead@example.com").await;
    let assignee = seed_user(&harness.users, "dev@example.com").await;
    let task = harness
        .coordinator
        .create(CreateTaskRequest::new(
            "Prepare demo environment",
            "Stand up a demo tenant",
            assigner.id(),
            assignee.id(),
        ))
        .await
        .expect("task creation should succeed");

    harness
        .coordinator
        .remove_user(assignee.id())
        .await
        .expect("user removal should succeed");

    let result = harness
        .coordinator
        .transition(task.id(), TaskStatus::InProgress, assignee.id())
        .await;
    assert!(matches!(result, Err(LifecycleError::Unassigned(id)) if id == task.id()));
}
