//! Service layer for invitations and registration completion.

use crate::directory::{
    domain::{
        EmailAddress, EmployeeId, JoiningId, Registration, User, UserDomainError, UserId,
    },
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Source of the numeric suffix appended to derived employee IDs.
///
/// Injected like the clock so tests can pin the suffix.
pub trait SuffixSource: Send + Sync {
    /// Returns a suffix, expected within
    /// [`EmployeeId::MIN_SUFFIX`]`..=`[`EmployeeId::MAX_SUFFIX`]; values
    /// outside the range are clamped during derivation.
    fn suffix(&self) -> u16;
}

/// Suffix source backed by fresh UUID entropy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSuffixSource;

impl SuffixSource for DefaultSuffixSource {
    fn suffix(&self) -> u16 {
        let span = EmployeeId::MAX_SUFFIX - EmployeeId::MIN_SUFFIX + 1;
        let entropy = Uuid::new_v4().as_bytes().iter().copied().fold(0_u16, |acc, byte| {
            acc.wrapping_mul(31).wrapping_add(u16::from(byte))
        });
        entropy
            .checked_rem(span)
            .map_or(EmployeeId::MIN_SUFFIX, |offset| {
                EmployeeId::MIN_SUFFIX + offset
            })
    }
}

/// Request payload for completing signup against an invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    joining_id: String,
    name: String,
    phone_number: String,
}

impl SignupRequest {
    /// Creates a signup request.
    #[must_use]
    pub fn new(
        joining_id: impl Into<String>,
        name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            joining_id: joining_id.into(),
            name: name.into(),
            phone_number: phone_number.into(),
        }
    }
}

/// Service-level errors for registration operations.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),

    /// The email address already has an invitation or account.
    ///
    /// Carries the existing joining ID so the boundary can resurface it,
    /// as the original flow did.
    #[error("email {email} already invited")]
    EmailAlreadyInvited {
        /// The duplicated email address.
        email: EmailAddress,
        /// The joining ID already issued for the address.
        joining_id: JoiningId,
    },

    /// No invitation matches the supplied joining ID.
    #[error("unknown joining ID: {0}")]
    UnknownJoiningId(JoiningId),

    /// No registered user carries the supplied employee ID.
    #[error("unknown employee ID: {0}")]
    UnknownEmployeeId(EmployeeId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for registration service operations.
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Default organization applied to invitations.
const DEFAULT_ORGANIZATION: &str = "teams";

/// Invitation and registration orchestration service.
#[derive(Clone)]
pub struct RegistrationService<R, C, S>
where
    R: UserRepository,
    C: Clock + Send + Sync,
    S: SuffixSource,
{
    repository: Arc<R>,
    clock: Arc<C>,
    suffixes: Arc<S>,
}

impl<R, C, S> RegistrationService<R, C, S>
where
    R: UserRepository,
    C: Clock + Send + Sync,
    S: SuffixSource,
{
    /// Creates a new registration service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, suffixes: Arc<S>) -> Self {
        Self {
            repository,
            clock,
            suffixes,
        }
    }

    /// Issues an invitation for the given email address.
    ///
    /// Creates a provisional user carrying a fresh joining ID; the user
    /// stays provisional until [`Self::complete_signup`] runs.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::EmailAlreadyInvited`] when the address
    /// already has a user, [`RegistrationError::Domain`] when the address
    /// is malformed, and [`RegistrationError::Repository`] when persistence
    /// fails.
    pub async fn invite(&self, email: impl Into<String> + Send) -> RegistrationResult<User> {
        let address = EmailAddress::new(email)?;
        if let Some(existing) = self.repository.find_by_email(&address).await? {
            return Err(RegistrationError::EmailAlreadyInvited {
                email: address,
                joining_id: existing.joining_id().clone(),
            });
        }

        let user = User::invited(
            address,
            JoiningId::generate(),
            DEFAULT_ORGANIZATION,
            &*self.clock,
        )?;
        self.repository.store(&user).await?;
        Ok(user)
    }

    /// Completes signup against an issued invitation.
    ///
    /// Derives the employee ID from the first segment of the supplied name,
    /// the invitation's organization, and a suffix from the injected
    /// source.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::UnknownJoiningId`] when no invitation
    /// matches, [`RegistrationError::Domain`] when the fields fail
    /// validation or the user is already registered, and
    /// [`RegistrationError::Repository`] when persistence fails.
    pub async fn complete_signup(&self, request: SignupRequest) -> RegistrationResult<User> {
        let joining_id = JoiningId::new(request.joining_id)?;
        let mut user = self
            .repository
            .find_by_joining_id(&joining_id)
            .await?
            .ok_or(RegistrationError::UnknownJoiningId(joining_id))?;

        let employee_id = EmployeeId::derive(
            &request.name,
            user.organization(),
            self.suffixes.suffix(),
        )?;
        let registration = Registration::new(request.name, employee_id, request.phone_number)?;
        user.complete_registration(registration, &*self.clock)?;
        self.repository.update(&user).await?;
        Ok(user)
    }

    /// Returns whether an invitation exists for the joining ID.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Domain`] when the joining ID is
    /// malformed and [`RegistrationError::Repository`] when lookup fails.
    pub async fn joining_id_exists(
        &self,
        joining_id: impl Into<String> + Send,
    ) -> RegistrationResult<bool> {
        let parsed = JoiningId::new(joining_id)?;
        Ok(self.repository.find_by_joining_id(&parsed).await?.is_some())
    }

    /// Grants the admin role to the user carrying the employee ID.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::UnknownEmployeeId`] when no user
    /// matches and [`RegistrationError::Repository`] when persistence
    /// fails.
    pub async fn make_admin(&self, employee_id: &EmployeeId) -> RegistrationResult<User> {
        let mut user = self
            .repository
            .find_by_employee_id(employee_id)
            .await?
            .ok_or_else(|| RegistrationError::UnknownEmployeeId(employee_id.clone()))?;
        user.grant_admin(&*self.clock);
        self.repository.update(&user).await?;
        Ok(user)
    }

    /// Retrieves a user by internal identifier.
    ///
    /// Returns `Ok(None)` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Repository`] when lookup fails.
    pub async fn get(&self, id: UserId) -> RegistrationResult<Option<User>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Retrieves a user by employee ID.
    ///
    /// Returns `Ok(None)` when no registered user matches.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Repository`] when lookup fails.
    pub async fn find_by_employee_id(
        &self,
        employee_id: &EmployeeId,
    ) -> RegistrationResult<Option<User>> {
        Ok(self.repository.find_by_employee_id(employee_id).await?)
    }
}
