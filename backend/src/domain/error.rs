//! Domain-level error taxonomy for the credential subsystem.
//!
//! These errors are transport agnostic. Callers match on [`UsersError`]
//! variants (or on the stable [`ErrorCode`]) and never on message text.

use serde::{Deserialize, Serialize};

use super::password::PasswordHashError;
use super::ports::UserPersistenceError;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The email address does not have an acceptable shape.
    InvalidEmail,
    /// The password contains control or otherwise non-printable characters.
    PasswordContainsInvalidChars,
    /// The password is shorter than the minimum length.
    PasswordTooShort,
    /// Another account already uses the email address.
    UserAlreadyExists,
    /// Login failed; deliberately does not say which factor was wrong.
    WrongCredentials,
    /// The password could not be hashed.
    HashingFailed,
    /// The storage backend found no matching row.
    NotFound,
    /// The storage backend could not be reached.
    ServiceUnavailable,
    /// An unexpected storage failure occurred.
    InternalError,
}

/// Errors returned by [`CredentialStore`](super::ports::CredentialStore)
/// operations.
///
/// Input-policy and conflict variants are unit-like so they compare by
/// identity. Storage failures that carry no domain meaning are passed through
/// unchanged in [`UsersError::Persistence`].
///
/// # Examples
/// ```
/// use ebox_users::domain::{ErrorCode, UsersError};
///
/// let err = UsersError::WrongCredentials;
/// assert_eq!(err.code(), ErrorCode::WrongCredentials);
/// assert_eq!(err.to_string(), "wrong credentials");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsersError {
    /// The email address failed validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// The password contains characters outside the printable set.
    #[error("password contains invalid characters")]
    PasswordContainsInvalidChars,
    /// The password is shorter than the minimum length.
    #[error("password is too short")]
    PasswordTooShort,
    /// The email address is already registered.
    #[error("user already exists")]
    UserAlreadyExists,
    /// Unknown email or mismatched password.
    #[error("wrong credentials")]
    WrongCredentials,
    /// Hashing the password failed; fatal for the current operation.
    #[error(transparent)]
    Hashing(#[from] PasswordHashError),
    /// Storage failure passed through without translation.
    #[error(transparent)]
    Persistence(UserPersistenceError),
}

impl UsersError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidEmail => ErrorCode::InvalidEmail,
            Self::PasswordContainsInvalidChars => ErrorCode::PasswordContainsInvalidChars,
            Self::PasswordTooShort => ErrorCode::PasswordTooShort,
            Self::UserAlreadyExists => ErrorCode::UserAlreadyExists,
            Self::WrongCredentials => ErrorCode::WrongCredentials,
            Self::Hashing(_) => ErrorCode::HashingFailed,
            Self::Persistence(error) => match error {
                UserPersistenceError::NotFound => ErrorCode::NotFound,
                UserPersistenceError::Connection { .. } => ErrorCode::ServiceUnavailable,
                UserPersistenceError::Query { .. } | UserPersistenceError::EmailTaken => {
                    ErrorCode::InternalError
                }
            },
        }
    }

    /// Returns `true` for caller-correctable input policy violations.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidEmail | Self::PasswordContainsInvalidChars | Self::PasswordTooShort
        )
    }
}
