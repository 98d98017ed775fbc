//! One-way password hashing.
//!
//! Hashes use bcrypt at a fixed work factor. The stored string embeds the
//! algorithm version, cost and salt, so comparison needs no other state.
//! bcrypt only reads [`MAX_PASSWORD_BYTES`] bytes of input; longer passwords
//! are refused rather than truncated.

use std::fmt;

use tracing::debug;

/// bcrypt cost applied to every new hash. Not configurable per call.
pub const PASSWORD_HASH_COST: u32 = 12;

/// Longest password, in UTF-8 bytes, that bcrypt hashes in full.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Failure to produce a password hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The hashing primitive reported an error (randomness or resources).
    #[error("password hashing failed: {message}")]
    Hashing { message: String },
    /// The password is longer than the hashing primitive can consume.
    #[error("password exceeds {MAX_PASSWORD_BYTES} bytes")]
    TooLong,
}

impl PasswordHashError {
    /// Create a hashing error with the given message.
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }
}

/// Opaque stored password hash.
///
/// `Debug` output never includes the hash itself.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a hash previously produced by [`hash_password`] and read back
    /// from storage. The value is not checked; malformed hashes simply never
    /// verify.
    pub fn from_stored(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Access the encoded hash for persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Hash `plaintext` with a fresh random salt.
///
/// # Errors
///
/// Returns [`PasswordHashError::TooLong`] for passwords over
/// [`MAX_PASSWORD_BYTES`] and [`PasswordHashError::Hashing`] when bcrypt
/// cannot produce a hash. Treat either as fatal for the current operation.
///
/// # Examples
/// ```no_run
/// use ebox_users::domain::{hash_password, verify_password};
///
/// let hash = hash_password("correct horse battery staple").unwrap();
/// assert!(verify_password(&hash, "correct horse battery staple"));
/// ```
pub fn hash_password(plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
    bcrypt::non_truncating_hash(plaintext, PASSWORD_HASH_COST)
        .map(PasswordHash)
        .map_err(|err| match err {
            bcrypt::BcryptError::Truncation(_) => PasswordHashError::TooLong,
            other => PasswordHashError::hashing(other.to_string()),
        })
}

/// Compare `plaintext` against a stored hash.
///
/// Returns `false` on mismatch, on any malformed hash and for passwords over
/// [`MAX_PASSWORD_BYTES`]; the caller cannot tell these apart.
pub fn verify_password(hash: &PasswordHash, plaintext: &str) -> bool {
    match bcrypt::non_truncating_verify(plaintext, hash.as_str()) {
        Ok(matched) => matched,
        Err(err) => {
            debug!(error = %err, "password could not be compared");
            false
        }
    }
}
