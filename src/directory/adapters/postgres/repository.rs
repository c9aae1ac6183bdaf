//! `PostgreSQL` repository implementation for user storage.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::directory::{
    domain::{
        EmailAddress, EmployeeId, JoiningId, PersistedUserData, Registration, User, UserId,
    },
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use std::collections::BTreeSet;
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by directory adapters.
pub type UserPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: UserPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: UserPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

fn is_email_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name.contains("email"))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let email = user.email().clone();
        let new_row = to_new_row(user)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_email_unique_violation(info.as_ref()) =>
                    {
                        UserRepositoryError::DuplicateEmail(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(user_id)
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let row = to_new_row(user)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(users::table.find(user_id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(UserRepositoryError::persistence)?;
            if affected == 0 {
                return Err(UserRepositoryError::NotFound(user_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .find(id.into_inner())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let needle = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(needle))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_joining_id(
        &self,
        joining_id: &JoiningId,
    ) -> UserRepositoryResult<Option<User>> {
        let needle = joining_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::joining_id.eq(needle))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_employee_id(
        &self,
        employee_id: &EmployeeId,
    ) -> UserRepositoryResult<Option<User>> {
        let needle = employee_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::employee_id.eq(needle))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(users::table.find(id.into_inner()))
                .execute(connection)
                .map_err(UserRepositoryError::persistence)?;
            if affected == 0 {
                return Err(UserRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn set_to_value(set: &BTreeSet<TaskId>) -> UserRepositoryResult<serde_json::Value> {
    let ids: Vec<Uuid> = set.iter().copied().map(TaskId::into_inner).collect();
    serde_json::to_value(ids).map_err(UserRepositoryError::persistence)
}

fn value_to_set(value: serde_json::Value) -> UserRepositoryResult<BTreeSet<TaskId>> {
    let ids: Vec<Uuid> =
        serde_json::from_value(value).map_err(UserRepositoryError::persistence)?;
    Ok(ids.into_iter().map(TaskId::from_uuid).collect())
}

fn to_new_row(user: &User) -> UserRepositoryResult<NewUserRow> {
    Ok(NewUserRow {
        id: user.id().into_inner(),
        email: user.email().as_str().to_owned(),
        joining_id: user.joining_id().as_str().to_owned(),
        organization: user.organization().to_owned(),
        is_admin: user.is_admin(),
        name: user
            .registration()
            .map(|registration| registration.name().to_owned()),
        employee_id: user
            .registration()
            .map(|registration| registration.employee_id().as_str().to_owned()),
        phone_number: user
            .registration()
            .map(|registration| registration.phone_number().to_owned()),
        task_assigned: set_to_value(user.assigned())?,
        task_in_progress: set_to_value(user.in_progress())?,
        task_completed: set_to_value(user.completed())?,
        created_at: user.created_at(),
        updated_at: user.updated_at(),
    })
}

fn row_registration(row: &UserRow) -> UserRepositoryResult<Option<Registration>> {
    match (&row.name, &row.employee_id, &row.phone_number) {
        (None, None, None) => Ok(None),
        (Some(name), Some(employee_id), Some(phone_number)) => {
            let parsed =
                EmployeeId::new(employee_id).map_err(UserRepositoryError::persistence)?;
            let registration = Registration::new(name, parsed, phone_number)
                .map_err(UserRepositoryError::persistence)?;
            Ok(Some(registration))
        }
        _ => Err(UserRepositoryError::persistence(std::io::Error::other(
            format!("partially populated registration fields for user {}", row.id),
        ))),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let registration = row_registration(&row)?;
    let email = EmailAddress::new(&row.email).map_err(UserRepositoryError::persistence)?;
    let joining_id = JoiningId::new(&row.joining_id).map_err(UserRepositoryError::persistence)?;

    Ok(User::from_persisted(PersistedUserData {
        id: UserId::from_uuid(row.id),
        email,
        joining_id,
        organization: row.organization,
        is_admin: row.is_admin,
        registration,
        assigned: value_to_set(row.task_assigned)?,
        in_progress: value_to_set(row.task_in_progress)?,
        completed: value_to_set(row.task_completed)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
