//! Database migration command.
//!
//! Applies the server crate's migrations to the configured database.
//! Migration files live in `crates/server/migrations/`.

use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

use super::CommandError;

/// Run database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration cannot be applied.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    info!("Migrations complete");
    Ok(())
}
