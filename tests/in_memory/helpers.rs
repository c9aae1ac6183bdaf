//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::directory::{
    adapters::memory::InMemoryUserRepository,
    domain::User,
    services::{RegistrationService, SignupRequest, SuffixSource},
};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository, services::LifecycleCoordinator,
};

/// Pins the derived employee ID suffix for deterministic assertions.
pub struct FixedSuffix(pub u16);

impl SuffixSource for FixedSuffix {
    fn suffix(&self) -> u16 {
        self.0
    }
}

/// Registration service wired over the shared user store.
pub type TestRegistration = RegistrationService<InMemoryUserRepository, DefaultClock, FixedSuffix>;

/// Lifecycle coordinator wired over the shared stores.
pub type TestCoordinator =
    LifecycleCoordinator<InMemoryTaskRepository, InMemoryUserRepository, DefaultClock>;

/// In-memory backend shared by the registration service and the
/// coordinator, mirroring the production wiring where both talk to the
/// same user store.
pub struct Backend {
    /// Direct handle onto the user store for set assertions.
    pub users: Arc<InMemoryUserRepository>,
    /// Invitation and signup service.
    pub registration: TestRegistration,
    /// Task lifecycle coordinator.
    pub coordinator: TestCoordinator,
}

/// Provides a fresh shared backend for each test.
#[fixture]
pub fn backend() -> Backend {
    let users = Arc::new(InMemoryUserRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    Backend {
        registration: RegistrationService::new(
            Arc::clone(&users),
            Arc::new(DefaultClock),
            Arc::new(FixedSuffix(150)),
        ),
        coordinator: LifecycleCoordinator::new(tasks, Arc::clone(&users), Arc::new(DefaultClock)),
        users,
    }
}

/// Invites and registers a user, returning the registered aggregate.
///
/// # Panics
///
/// Panics when invitation or signup fails; both are preconditions of the
/// calling test.
pub async fn registered_user(backend: &Backend, email: &str, name: &str) -> User {
    let invited = backend
        .registration
        .invite(email)
        .await
        .expect("invitation should succeed");
    backend
        .registration
        .complete_signup(SignupRequest::new(
            invited.joining_id().as_str(),
            name,
            "555-0100",
        ))
        .await
        .expect("signup should succeed")
}
