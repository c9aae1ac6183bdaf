//! Error types for directory domain validation.

use super::UserId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain user values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The email address is empty or malformed.
    #[error("invalid email address: '{0}'")]
    InvalidEmail(String),

    /// The joining ID is empty or contains whitespace.
    #[error("invalid joining ID: '{0}'")]
    InvalidJoiningId(String),

    /// The employee ID is empty or contains whitespace.
    #[error("invalid employee ID: '{0}'")]
    InvalidEmployeeId(String),

    /// The user name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyName,

    /// The phone number is empty after trimming.
    #[error("phone number must not be empty")]
    EmptyPhoneNumber,

    /// The organization name is empty after trimming.
    #[error("organization must not be empty")]
    EmptyOrganization,

    /// Registration was already completed for this user.
    #[error("user {0} is already registered")]
    AlreadyRegistered(UserId),
}
