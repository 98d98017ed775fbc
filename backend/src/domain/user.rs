//! User data model.
//!
//! [`User`] is the public projection returned to callers. The stored password
//! hash only ever travels inside [`NewUserRecord`] and [`CredentialRecord`],
//! which stay between the credential service and the storage port.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::password::PasswordHash;

/// Storage-assigned user identifier.
///
/// Identifiers are generated by the storage backend on insert and never
/// change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier read from storage.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optional display fields attached to an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Avatar image location, if the user supplied one.
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// Build a profile from its parts.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        avatar_url: Option<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            avatar_url,
        }
    }
}

/// Application user as exposed outside the storage boundary.
///
/// ## Invariants
/// - `id` is assigned by storage and immutable.
/// - `email` is unique across all users and stored exactly as submitted.
/// - There is no password or hash field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    email: String,
    first_name: String,
    last_name: String,
    avatar_url: Option<String>,
}

impl User {
    /// Build a [`User`] from a stored row.
    pub fn new(id: UserId, email: impl Into<String>, profile: UserProfile) -> Self {
        let UserProfile {
            first_name,
            last_name,
            avatar_url,
        } = profile;
        Self {
            id,
            email: email.into(),
            first_name,
            last_name,
            avatar_url,
        }
    }

    /// Storage-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Registered email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Avatar image location, if any.
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }
}

/// Raw registration input.
///
/// The plaintext password is wiped from memory when the request is dropped
/// and is redacted from `Debug` output.
///
/// # Examples
/// ```
/// use ebox_users::domain::{PostUserRequestData, UserProfile};
///
/// let request = PostUserRequestData::new(
///     "ada@example.com",
///     "correct horse battery staple",
///     UserProfile::new("Ada", "Lovelace", None),
/// );
/// assert_eq!(request.password(), "correct horse battery staple");
/// assert!(!format!("{request:?}").contains("horse"));
/// ```
#[derive(Clone)]
pub struct PostUserRequestData {
    /// Email address to register.
    pub email: String,
    password: Zeroizing<String>,
    /// Display fields stored alongside the credentials.
    pub profile: UserProfile,
}

impl PostUserRequestData {
    /// Assemble a registration request.
    pub fn new(email: impl Into<String>, password: impl Into<String>, profile: UserProfile) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
            profile,
        }
    }

    /// Plaintext password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for PostUserRequestData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostUserRequestData")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("profile", &self.profile)
            .finish()
    }
}

/// Row handed to the storage port when creating an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    /// Email address; must be unique.
    pub email: String,
    /// Salted one-way hash of the password.
    pub password_hash: PasswordHash,
    /// Display fields.
    pub profile: UserProfile,
}

/// Stored credentials looked up during login validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// Identifier of the account owning the credentials.
    pub id: UserId,
    /// Stored hash to compare the presented password against.
    pub password_hash: PasswordHash,
}
