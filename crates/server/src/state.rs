//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::services::blob::BlobClient;
use crate::services::stripe::StripeClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: PgPool,
    stripe: StripeClient,
    blob: BlobClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Stripe or blob HTTP clients fail to build
    /// (malformed credentials).
    pub fn new(config: AppConfig, pool: PgPool) -> Result<Self, StateError> {
        let stripe = StripeClient::new(&config)?;
        let blob = BlobClient::new(&config)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                stripe,
                blob,
            }),
        })
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Stripe API client.
    #[must_use]
    pub fn stripe(&self) -> &StripeClient {
        &self.inner.stripe
    }

    /// Get a reference to the blob store client.
    #[must_use]
    pub fn blob(&self) -> &BlobClient {
        &self.inner.blob
    }
}

/// Error creating application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("stripe client error: {0}")]
    Stripe(#[from] crate::services::stripe::StripeError),
    #[error("blob client error: {0}")]
    Blob(#[from] crate::services::blob::BlobError),
}
