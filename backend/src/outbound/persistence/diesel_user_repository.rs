//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Each port method is one statement on one pooled connection. Inserts use
//! `INSERT ... RETURNING` so the generated id and the stored profile come back
//! in the same round trip as the write.
//!
//! # Error classification
//!
//! Unique violations on [`EMAIL_UNIQUE_CONSTRAINT`] become
//! [`UserPersistenceError::EmailTaken`]; Diesel's `NotFound` becomes
//! [`UserPersistenceError::NotFound`]. Everything else is reported as a
//! connection or query failure without further interpretation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{CredentialRecord, NewUserRecord, PasswordHash, User, UserId, UserProfile};

use super::models::{CredentialRow, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Name of the unique constraint guarding `users.email`.
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

fn is_email_violation(constraint_name: Option<&str>, message: &str) -> bool {
    match constraint_name {
        Some(name) => name == EMAIL_UNIQUE_CONSTRAINT,
        None => message.contains(EMAIL_UNIQUE_CONSTRAINT),
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserPersistenceError::not_found(),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation
                if is_email_violation(info.constraint_name(), info.message()) =>
            {
                UserPersistenceError::email_taken()
            }
            DatabaseErrorKind::UniqueViolation => {
                warn!(
                    constraint_name = ?info.constraint_name(),
                    "unique violation on a constraint other than email"
                );
                UserPersistenceError::query("unique constraint violation")
            }
            DatabaseErrorKind::ClosedConnection => {
                UserPersistenceError::connection("database connection error")
            }
            _ => UserPersistenceError::query("database error"),
        },
        _ => UserPersistenceError::query("database error"),
    }
}

fn row_to_user(row: UserRow) -> User {
    User::new(
        UserId::new(row.id),
        row.email,
        UserProfile::new(row.first_name, row.last_name, row.avatar_url),
    )
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, record: NewUserRecord) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            email: record.email.as_str(),
            password: record.password_hash.as_str(),
            first_name: record.profile.first_name.as_str(),
            last_name: record.profile.last_name.as_str(),
            avatar_url: record.profile.avatar_url.as_deref(),
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_user(row))
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = users::table
            .filter(users::id.eq(id.get()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_user(row))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<CredentialRecord, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: CredentialRow = users::table
            .filter(users::email.eq(email))
            .select(CredentialRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(CredentialRecord {
            id: UserId::new(row.id),
            password_hash: PasswordHash::from_stored(row.password),
        })
    }
}
