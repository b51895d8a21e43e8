//! Database operations for the Atelier Noir `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `products` - Catalog rows, statuses `active` / `pre-order` / `out-of-stock`
//! - `orders` / `order_items` - Read-only aggregation targets for analytics
//! - `subscribers` - Newsletter list keyed by lowercased email
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p atelier-noir-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod orders;
pub mod products;
pub mod subscribers;

pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use subscribers::SubscriberRepository;

/// Errors from repository operations.
///
/// Rows holding values the domain types reject (a bad status string, a
/// malformed email) surface as `sqlx::Error::ColumnDecode`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
