//! Domain primitives, policies and services for user credentials.
//!
//! Purpose: define the public user projection, the input policy, the
//! password hashing contract and the error taxonomy, plus the service that
//! ties them to a storage port. Nothing here depends on a concrete database.
//!
//! Public surface:
//! - User, UserId, UserProfile, PostUserRequestData: account entities.
//! - validate_email, validate_password: pure input policy checks.
//! - hash_password, verify_password, PasswordHash: bcrypt contract.
//! - UsersError, ErrorCode: stable failure taxonomy.
//! - CredentialService: `CredentialStore` implementation over a repository.

pub mod credential_service;
pub mod error;
pub mod password;
pub mod ports;
pub mod user;
pub mod validation;

pub use self::credential_service::CredentialService;
pub use self::error::{ErrorCode, UsersError};
pub use self::password::{
    MAX_PASSWORD_BYTES, PASSWORD_HASH_COST, PasswordHash, PasswordHashError, hash_password,
    verify_password,
};
pub use self::user::{
    CredentialRecord, NewUserRecord, PostUserRequestData, User, UserId, UserProfile,
};
pub use self::validation::{MIN_PASSWORD_LENGTH, validate_email, validate_password};
