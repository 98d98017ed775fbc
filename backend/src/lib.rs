//! User account credential store.
//!
//! Registration, profile lookup and login validation over a pluggable
//! storage backend. The [`domain`] module owns the policy (validation,
//! hashing, error taxonomy); [`outbound`] holds the PostgreSQL and in-memory
//! adapters; [`config`] loads persistence settings.

pub mod config;
pub mod domain;
pub mod outbound;
