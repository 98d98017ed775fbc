//! Credential domain service.
//!
//! Implements the [`CredentialStore`] driving port on top of any
//! [`UserRepository`]. The service holds no mutable state; uniqueness and
//! atomicity are delegated to the repository.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{CredentialStore, UserPersistenceError, UserRepository};
use crate::domain::{
    NewUserRecord, PasswordHash, PasswordHashError, PostUserRequestData, User, UserId, UsersError,
    hash_password, validate_email, validate_password, verify_password,
};

/// Hash compared against when an email is unknown, so a miss costs the same
/// as a wrong password.
static TIMING_GUARD_HASH: OnceLock<PasswordHash> = OnceLock::new();

fn timing_guard_hash() -> &'static PasswordHash {
    TIMING_GUARD_HASH
        .get_or_init(|| guard_hash_or_placeholder(hash_password("timing guard placeholder")))
}

/// An empty placeholder fails to parse at once, so unknown emails then
/// answer faster than wrong passwords.
fn guard_hash_or_placeholder(built: Result<PasswordHash, PasswordHashError>) -> PasswordHash {
    built.unwrap_or_else(|err| {
        warn!(
            error = %err,
            "timing guard hash unavailable; unknown-email logins will answer early"
        );
        PasswordHash::from_stored(String::new())
    })
}

/// Credential service implementing the driving port.
pub struct CredentialService<R> {
    repository: Arc<R>,
}

impl<R> CredentialService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> Clone for CredentialService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

/// Run the work-factor-bound hash on the blocking pool.
async fn hash_on_blocking_pool(
    password: Zeroizing<String>,
) -> Result<PasswordHash, PasswordHashError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|err| PasswordHashError::hashing(format!("hashing task failed: {err}")))?
}

/// Compare on the blocking pool; `None` burns a comparison and fails.
async fn verify_on_blocking_pool(stored: Option<PasswordHash>, password: Zeroizing<String>) -> bool {
    let outcome = tokio::task::spawn_blocking(move || match stored {
        Some(hash) => verify_password(&hash, &password),
        None => {
            let _ = verify_password(timing_guard_hash(), &password);
            false
        }
    })
    .await;

    outcome.unwrap_or_else(|err| {
        warn!(error = %err, "password comparison task failed");
        false
    })
}

#[async_trait]
impl<R> CredentialStore for CredentialService<R>
where
    R: UserRepository + 'static,
{
    async fn create_user(&self, request: PostUserRequestData) -> Result<User, UsersError> {
        validate_email(&request.email)?;
        validate_password(request.password())?;

        let password_hash =
            hash_on_blocking_pool(Zeroizing::new(request.password().to_owned())).await?;
        let PostUserRequestData { email, profile, .. } = request;
        let record = NewUserRecord {
            email,
            password_hash,
            profile,
        };

        match self.repository.insert(record).await {
            Ok(user) => {
                info!(user_id = %user.id(), "user created");
                Ok(user)
            }
            Err(UserPersistenceError::EmailTaken) => {
                debug!("registration rejected: email already registered");
                Err(UsersError::UserAlreadyExists)
            }
            Err(err) => {
                warn!(error = %err, "user insert failed");
                Err(UsersError::Persistence(err))
            }
        }
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<User, UsersError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(UsersError::Persistence)
    }

    async fn validate_user(&self, email: &str, password: &str) -> Result<UserId, UsersError> {
        let (user_id, stored_hash) = match self.repository.find_credentials_by_email(email).await
        {
            Ok(record) => (Some(record.id), Some(record.password_hash)),
            Err(UserPersistenceError::NotFound) => (None, None),
            Err(err) => {
                warn!(error = %err, "credential lookup failed");
                (None, None)
            }
        };

        let matched =
            verify_on_blocking_pool(stored_hash, Zeroizing::new(password.to_owned())).await;

        match (matched, user_id) {
            (true, Some(id)) => {
                debug!(user_id = %id, "credentials validated");
                Ok(id)
            }
            _ => {
                debug!("credential validation failed");
                Err(UsersError::WrongCredentials)
            }
        }
    }
}

#[cfg(test)]
#[path = "credential_service_tests.rs"]
mod tests;
