//! Product repository for catalog and inventory reads.
//!
//! All queries are plain projections; product writes happen through an
//! external pipeline, not this service.

use sqlx::PgPool;

use atelier_noir_core::ProductStatus;

use super::RepositoryError;
use crate::models::{CategoryCount, Product};

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, subtitle, description, price_eur, price_usd,
                   images, category, materials, essences, product_code,
                   quantity_available, quantity_total, preorder_date, status,
                   created_at, updated_at
            FROM products
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Products in a storefront-visible status (`active`, `pre-order`,
    /// `out-of-stock`), newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_available(&self) -> Result<Vec<Product>, RepositoryError> {
        let statuses: Vec<String> = ProductStatus::STOREFRONT_VISIBLE
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();

        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, subtitle, description, price_eur, price_usd,
                   images, category, materials, essences, product_code,
                   quantity_available, quantity_total, preorder_date, status,
                   created_at, updated_at
            FROM products
            WHERE status = ANY($1)
            ORDER BY created_at DESC
            ",
        )
        .bind(&statuses)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Active product count per category, alphabetical.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<CategoryCount>, RepositoryError> {
        let counts = sqlx::query_as::<_, CategoryCount>(
            r"
            SELECT category, COUNT(*) AS product_count
            FROM products
            WHERE status = 'active'
            GROUP BY category
            ORDER BY category
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(counts)
    }

    /// Total number of catalog rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;

        Ok(count.0)
    }
}
