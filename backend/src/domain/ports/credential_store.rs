//! Driving port for account registration, lookup and login validation.
//!
//! Callers (HTTP handlers, jobs, tests) depend on this trait rather than on a
//! concrete service, so the storage backend can be swapped without touching
//! them.

use async_trait::async_trait;

use crate::domain::{PostUserRequestData, User, UserId, UsersError};

/// Domain use-case port for user credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Register a new account.
    ///
    /// Fails with a validation error before anything is hashed or stored,
    /// with [`UsersError::UserAlreadyExists`] for a duplicate email, and
    /// passes any other storage failure through unchanged.
    async fn create_user(&self, request: PostUserRequestData) -> Result<User, UsersError>;

    /// Fetch a user's public projection.
    ///
    /// A missing row surfaces as the storage backend's own not-found error.
    async fn get_user_by_id(&self, id: UserId) -> Result<User, UsersError>;

    /// Check an email/password pair and return the matching user id.
    ///
    /// Unknown emails, wrong passwords, unreadable stored hashes and lookup
    /// failures all yield [`UsersError::WrongCredentials`].
    async fn validate_user(&self, email: &str, password: &str) -> Result<UserId, UsersError>;
}
