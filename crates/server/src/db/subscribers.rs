//! Subscriber repository for the newsletter list.

use sqlx::PgPool;

use atelier_noir_core::Email;

use super::RepositoryError;
use crate::models::Subscriber;

/// Repository for newsletter subscriber operations.
pub struct SubscriberRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubscriberRepository<'a> {
    /// Create a new subscriber repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert the email if it is not already on the list.
    ///
    /// Returns `true` when a new row was inserted, `false` when the email was
    /// already subscribed. Concurrent inserts are resolved by the unique
    /// index on `email`, not application-level coordination.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn subscribe(&self, email: &Email) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO subscribers (email)
            VALUES ($1)
            ON CONFLICT (email) DO NOTHING
            ",
        )
        .bind(email)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Delete a subscriber by email key.
    ///
    /// Returns `true` when a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, email: &Email) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM subscribers WHERE email = $1")
            .bind(email)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// All subscribers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Subscriber>, RepositoryError> {
        let subscribers = sqlx::query_as::<_, Subscriber>(
            r"
            SELECT id, email, status, created_at
            FROM subscribers
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(subscribers)
    }

    /// Total number of subscribers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM subscribers")
            .fetch_one(self.pool)
            .await?;

        Ok(count.0)
    }
}
