//! In-memory implementation of the `UserRepository` port.
//!
//! Behaves like the PostgreSQL adapter for everything the domain can
//! observe: identifiers are assigned on insert starting at 1, emails are
//! unique (compared byte for byte), and missing rows report `NotFound`.
//! State lives behind a mutex and is lost when the repository is dropped.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{CredentialRecord, NewUserRecord, PasswordHash, User, UserId};

#[derive(Debug)]
struct StoredUser {
    user: User,
    password_hash: PasswordHash,
}

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    rows: Vec<StoredUser>,
    by_email: HashMap<String, usize>,
}

/// Mutex-guarded user store for tests and local wiring.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Mutex<State>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users, counted even after a panic poisoned the lock.
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .rows
            .len()
    }

    /// Returns `true` when no users are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, State>, UserPersistenceError> {
        self.state
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, record: NewUserRecord) -> Result<User, UserPersistenceError> {
        let mut state = self.lock()?;
        if state.by_email.contains_key(&record.email) {
            return Err(UserPersistenceError::email_taken());
        }

        state.next_id += 1;
        let user = User::new(
            UserId::new(state.next_id),
            record.email.clone(),
            record.profile,
        );
        let index = state.rows.len();
        state.rows.push(StoredUser {
            user: user.clone(),
            password_hash: record.password_hash,
        });
        state.by_email.insert(record.email, index);
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, UserPersistenceError> {
        let state = self.lock()?;
        id.get()
            .checked_sub(1)
            .and_then(|offset| usize::try_from(offset).ok())
            .and_then(|index| state.rows.get(index))
            .map(|row| row.user.clone())
            .ok_or_else(UserPersistenceError::not_found)
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<CredentialRecord, UserPersistenceError> {
        let state = self.lock()?;
        let row = state
            .by_email
            .get(email)
            .and_then(|index| state.rows.get(*index))
            .ok_or_else(UserPersistenceError::not_found)?;
        Ok(CredentialRecord {
            id: row.user.id(),
            password_hash: row.password_hash.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::UserProfile;
    use rstest::{fixture, rstest};

    fn record(email: &str, first_name: &str) -> NewUserRecord {
        NewUserRecord {
            email: email.to_owned(),
            password_hash: PasswordHash::from_stored(format!("hash-for-{email}")),
            profile: UserProfile::new(first_name, "Tester", None),
        }
    }

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_sequential_ids(repo: InMemoryUserRepository) {
        let first = repo.insert(record("a@example.com", "A")).await.expect("insert");
        let second = repo.insert(record("b@example.com", "B")).await.expect("insert");

        assert_eq!(first.id(), UserId::new(1));
        assert_eq!(second.id(), UserId::new(2));
        assert_eq!(repo.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected_and_original_kept(repo: InMemoryUserRepository) {
        let original = repo
            .insert(record("a@example.com", "Original"))
            .await
            .expect("insert");

        let err = repo
            .insert(record("a@example.com", "Impostor"))
            .await
            .expect_err("duplicate email");

        assert_eq!(err, UserPersistenceError::EmailTaken);
        assert_eq!(repo.len(), 1);
        let stored = repo.find_by_id(original.id()).await.expect("lookup");
        assert_eq!(stored.first_name(), "Original");
        let credentials = repo
            .find_credentials_by_email("a@example.com")
            .await
            .expect("credentials");
        assert_eq!(
            credentials.password_hash,
            PasswordHash::from_stored("hash-for-a@example.com")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn emails_are_not_case_folded(repo: InMemoryUserRepository) {
        repo.insert(record("a@example.com", "Lower")).await.expect("insert");
        repo.insert(record("A@example.com", "Upper"))
            .await
            .expect("differently cased email is a distinct account");

        assert_eq!(repo.len(), 2);
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(99)]
    #[tokio::test]
    async fn missing_ids_report_not_found(repo: InMemoryUserRepository, #[case] id: i64) {
        repo.insert(record("a@example.com", "A")).await.expect("insert");

        let err = repo.find_by_id(UserId::new(id)).await.expect_err("missing");
        assert_eq!(err, UserPersistenceError::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn poisoned_lock_still_counts_rows(repo: InMemoryUserRepository) {
        repo.insert(record("a@example.com", "A")).await.expect("insert");

        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = repo.state.lock().expect("lock");
            panic!("poison the user store");
        }));
        assert!(poisoned.is_err());

        assert_eq!(repo.len(), 1);
        assert!(!repo.is_empty());
        let err = repo
            .find_by_id(UserId::new(1))
            .await
            .expect_err("poisoned store refuses reads");
        assert!(matches!(err, UserPersistenceError::Connection { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_email_reports_not_found(repo: InMemoryUserRepository) {
        let err = repo
            .find_credentials_by_email("ghost@nowhere.test")
            .await
            .expect_err("missing");
        assert_eq!(err, UserPersistenceError::NotFound);
        assert!(repo.is_empty());
    }
}
