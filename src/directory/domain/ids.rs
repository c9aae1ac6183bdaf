//! Identifier and validated scalar types for the directory domain.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a directory user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for UserId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated email address used as the invitation key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// The value is trimmed and lower-cased. Validation is deliberately
    /// shallow: non-empty, exactly one `@` with text on both sides, and no
    /// whitespace. Deliverability is the mail collaborator's problem.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidEmail`] when the value does not
    /// meet the shape above.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let mut segments = normalized.split('@');
        let local = segments.next().unwrap_or_default();
        let host = segments.next().unwrap_or_default();
        let has_more_segments = segments.next().is_some();
        let is_valid = !local.is_empty()
            && !host.is_empty()
            && !has_more_segments
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(UserDomainError::InvalidEmail(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the email address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-time invitation code used to complete registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoiningId(String);

impl JoiningId {
    /// Number of hex characters in a generated joining ID.
    const GENERATED_LENGTH: usize = 20;

    /// Generates a fresh joining ID.
    ///
    /// Derived by hashing a random UUID and keeping the leading hex
    /// characters, matching the historical ten-random-bytes-as-hex shape.
    #[must_use]
    pub fn generate() -> Self {
        let digest = Sha256::digest(Uuid::new_v4().as_bytes());
        let code: String = digest
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect::<String>()
            .chars()
            .take(Self::GENERATED_LENGTH)
            .collect();
        Self(code)
    }

    /// Creates a validated joining ID from caller-supplied input.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidJoiningId`] when the trimmed value
    /// is empty or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(UserDomainError::InvalidJoiningId(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the joining ID as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for JoiningId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for JoiningId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-readable identifier assigned at registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Inclusive lower bound of the derived numeric suffix.
    pub const MIN_SUFFIX: u16 = 100;
    /// Inclusive upper bound of the derived numeric suffix.
    pub const MAX_SUFFIX: u16 = 200;

    /// Derives an employee ID as `firstname-organization-suffix`.
    ///
    /// The first whitespace-separated segment of `full_name` is used; a
    /// single-word name is used whole. The suffix is clamped into
    /// [`Self::MIN_SUFFIX`]`..=`[`Self::MAX_SUFFIX`].
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyName`] when the name has no
    /// non-whitespace segment and [`UserDomainError::EmptyOrganization`]
    /// when the organization is empty after trimming.
    pub fn derive(
        full_name: &str,
        organization: &str,
        suffix: u16,
    ) -> Result<Self, UserDomainError> {
        let first = full_name
            .split_whitespace()
            .next()
            .ok_or(UserDomainError::EmptyName)?;
        let org = organization.trim();
        if org.is_empty() {
            return Err(UserDomainError::EmptyOrganization);
        }
        let bounded = suffix.clamp(Self::MIN_SUFFIX, Self::MAX_SUFFIX);
        Ok(Self(format!("{first}-{org}-{bounded}")))
    }

    /// Creates a validated employee ID from caller-supplied input.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidEmployeeId`] when the trimmed
    /// value is empty or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(UserDomainError::InvalidEmployeeId(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the employee ID as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmployeeId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
