//! Port abstraction for user persistence adapters and their errors.
//!
//! This is the *driven* side of the credential service: adapters translate
//! backend failures into [`UserPersistenceError`], classifying email
//! uniqueness violations and missing rows so the domain never inspects
//! driver-specific error types.

use async_trait::async_trait;

use crate::domain::{CredentialRecord, NewUserRecord, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// No row matched the lookup.
        NotFound => "user record not found",
        /// Insert violated the unique constraint on the email column.
        EmailTaken => "email address is already registered",
    }
}

/// Storage backend for user accounts.
///
/// Every method is a single round trip; implementations must not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return its public projection, including the
    /// storage-assigned id, in the same atomic statement.
    ///
    /// Returns [`UserPersistenceError::EmailTaken`] when the email is already
    /// registered; the existing row is left untouched.
    async fn insert(&self, record: NewUserRecord) -> Result<User, UserPersistenceError>;

    /// Fetch the public projection of exactly one user.
    ///
    /// Returns [`UserPersistenceError::NotFound`] when no row matches.
    async fn find_by_id(&self, id: UserId) -> Result<User, UserPersistenceError>;

    /// Fetch the stored credentials for an email address.
    ///
    /// Returns [`UserPersistenceError::NotFound`] when no row matches.
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<CredentialRecord, UserPersistenceError>;
}
