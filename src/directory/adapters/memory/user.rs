//! In-memory repository for directory tests and in-process use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::{
    domain::{EmailAddress, EmployeeId, JoiningId, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    email_index: HashMap<String, UserId>,
    joining_index: HashMap<String, UserId>,
    employee_index: HashMap<String, UserId>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn index_user(state: &mut InMemoryUserState, user: &User) {
    state
        .email_index
        .insert(user.email().as_str().to_owned(), user.id());
    state
        .joining_index
        .insert(user.joining_id().as_str().to_owned(), user.id());
    if let Some(registration) = user.registration() {
        state
            .employee_index
            .insert(registration.employee_id().as_str().to_owned(), user.id());
    }
}

fn unindex_user(state: &mut InMemoryUserState, user: &User) {
    state.email_index.remove(user.email().as_str());
    state.joining_index.remove(user.joining_id().as_str());
    if let Some(registration) = user.registration() {
        state
            .employee_index
            .remove(registration.employee_id().as_str());
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }
        if state.email_index.contains_key(user.email().as_str()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }

        index_user(&mut state, user);
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let old_user = state
            .users
            .get(&user.id())
            .ok_or(UserRepositoryError::NotFound(user.id()))?
            .clone();

        unindex_user(&mut state, &old_user);
        index_user(&mut state, user);
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        let user = state
            .email_index
            .get(email.as_str())
            .and_then(|user_id| state.users.get(user_id))
            .cloned();
        Ok(user)
    }

    async fn find_by_joining_id(
        &self,
        joining_id: &JoiningId,
    ) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        let user = state
            .joining_index
            .get(joining_id.as_str())
            .and_then(|user_id| state.users.get(user_id))
            .cloned();
        Ok(user)
    }

    async fn find_by_employee_id(
        &self,
        employee_id: &EmployeeId,
    ) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        let user = state
            .employee_index
            .get(employee_id.as_str())
            .and_then(|user_id| state.users.get(user_id))
            .cloned();
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let user = state
            .users
            .remove(&id)
            .ok_or(UserRepositoryError::NotFound(id))?;
        unindex_user(&mut state, &user);
        Ok(())
    }
}
