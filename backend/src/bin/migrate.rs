//! Apply pending database migrations for the users schema.
//!
//! # Examples
//! ```sh
//! USERS_DB_DATABASE_URL=postgres://localhost/ebox cargo run --bin migrate
//! ```

use std::env;

use color_eyre::eyre::{Result, WrapErr, eyre};
use ebox_users::config::PersistenceSettings;
use ebox_users::outbound::persistence::run_pending_migrations;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = PersistenceSettings::load_from_iter(env::args_os())
        .map_err(|err| eyre!("failed to load persistence settings: {err}"))?;
    let applied = run_pending_migrations(settings.database_url())
        .wrap_err("failed to migrate users database")?;

    info!(applied, "users database is up to date");
    Ok(())
}
