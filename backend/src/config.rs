//! Persistence settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USERS_DB_*` environment variables or a
//! configuration file. Pool sizing defaults to the pool's own constants and
//! the URL falls back to [`DEFAULT_DATABASE_URL`].

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

/// Database used when no URL is configured.
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/ebox";

/// Connection settings for the users database.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_DB")]
pub struct PersistenceSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum number of pooled connections.
    #[ortho_config(default = 10)]
    pub max_connections: u32,
    /// Idle connections kept open.
    #[ortho_config(default = 2)]
    pub min_idle: u32,
    /// Seconds to wait for a pooled connection.
    #[ortho_config(default = 30)]
    pub connection_timeout_secs: u64,
}

impl PersistenceSettings {
    /// Return the configured database URL, falling back to the default.
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Build the pool configuration described by these settings.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.database_url())
            .with_max_size(self.max_connections)
            .with_min_idle(Some(self.min_idle))
            .with_connection_timeout(Duration::from_secs(self.connection_timeout_secs))
    }
}
