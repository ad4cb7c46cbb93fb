//! SQL migrations runner
//!
//! Migrations are plain `.sql` files read from disk at start-up, so the
//! binary does not need to be rebuilt when one is added.

use std::path::Path;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;
use tracing::info;

/// Apply every pending migration found in `dir`
///
/// Migrations recorded in the database but missing from `dir` are tolerated,
/// so an older binary can run against a newer schema.
pub async fn run_migrations(pool: &PgPool, dir: impl AsRef<Path>) -> Result<(), MigrateError> {
    let dir = dir.as_ref();
    let mut migrator = Migrator::new(dir).await?;
    migrator.set_ignore_missing(true);

    info!(dir = %dir.display(), count = migrator.iter().count(), "Applying migrations");
    migrator.run(pool).await?;
    info!("Migrations up to date");

    Ok(())
}
