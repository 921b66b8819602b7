//! Embedded schema migrations.
//!
//! The SQL under `backend/migrations` is compiled into the binary so
//! `shop-admin migrate` and `shop-admin reset` need no files at runtime.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations shipped with this build.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    #[error("failed to revert migrations: {message}")]
    Revert { message: String },
}

fn connect(database_url: &str) -> Result<PgConnection, MigrationError> {
    PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
        message: err.to_string(),
    })
}

/// Apply every pending migration and return the versions that ran.
///
/// Uses a blocking connection; call it from a blocking context.
pub fn run_pending_migrations(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut conn = connect(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;

    let versions: Vec<String> = applied.iter().map(ToString::to_string).collect();
    for version in &versions {
        info!(%version, "migration applied");
    }
    Ok(versions)
}

/// Revert every applied migration, dropping the shop tables and their data.
///
/// Returns the reverted versions, newest first. Uses a blocking connection.
pub fn revert_all_migrations(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut conn = connect(database_url)?;
    let reverted = conn
        .revert_all_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Revert {
            message: err.to_string(),
        })?;

    let versions: Vec<String> = reverted.iter().map(ToString::to_string).collect();
    for version in &versions {
        info!(%version, "migration reverted");
    }
    Ok(versions)
}
