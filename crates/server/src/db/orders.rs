//! Order repository: read-only aggregations over completed orders.
//!
//! Nothing in this service writes to `orders`/`order_items`; checkout hands
//! off to the hosted payment page and row creation happens elsewhere.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::RepositoryError;
use crate::models::OrderSummary;

/// Bucketing interval for revenue aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevenueInterval {
    #[default]
    Day,
    Week,
    Month,
}

impl RevenueInterval {
    /// The `date_trunc` field name for this interval.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl std::str::FromStr for RevenueInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(format!("invalid revenue interval: {s}")),
        }
    }
}

/// One bucket of the revenue aggregation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RevenuePoint {
    /// Bucket start (truncated order timestamp).
    pub bucket: DateTime<Utc>,
    /// Revenue across completed orders in the bucket.
    pub revenue: Decimal,
    /// Number of completed orders in the bucket.
    pub orders: i64,
}

/// One row of the top-products aggregation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TopProduct {
    pub product_name: String,
    pub units_sold: i64,
    pub revenue: Decimal,
}

/// Totals across all completed orders, for the dashboard.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CompletedTotals {
    pub orders: i64,
    pub revenue: Decimal,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Revenue and order count per interval bucket, newest bucket first,
    /// completed orders only.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn revenue(
        &self,
        interval: RevenueInterval,
    ) -> Result<Vec<RevenuePoint>, RepositoryError> {
        let points = sqlx::query_as::<_, RevenuePoint>(
            r"
            SELECT date_trunc($1, o.created_at) AS bucket,
                   COALESCE(SUM(oi.quantity * oi.unit_price), 0) AS revenue,
                   COUNT(DISTINCT o.id) AS orders
            FROM orders o
            JOIN order_items oi ON oi.order_id = o.id
            WHERE o.status = 'completed'
            GROUP BY bucket
            ORDER BY bucket DESC
            ",
        )
        .bind(interval.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(points)
    }

    /// Top products by units sold across completed orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn top_products(&self, limit: i64) -> Result<Vec<TopProduct>, RepositoryError> {
        let rows = sqlx::query_as::<_, TopProduct>(
            r"
            SELECT oi.product_name,
                   SUM(oi.quantity) AS units_sold,
                   SUM(oi.quantity * oi.unit_price) AS revenue
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            WHERE o.status = 'completed'
            GROUP BY oi.product_name
            ORDER BY units_sold DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Recent orders with item count and total, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent(&self, limit: i64) -> Result<Vec<OrderSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderSummary>(
            r"
            SELECT o.id, o.status, o.created_at,
                   COUNT(oi.id) AS item_count,
                   COALESCE(SUM(oi.quantity * oi.unit_price), 0) AS total
            FROM orders o
            LEFT JOIN order_items oi ON oi.order_id = o.id
            GROUP BY o.id
            ORDER BY o.created_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Order count and revenue across all completed orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn completed_totals(&self) -> Result<CompletedTotals, RepositoryError> {
        let totals = sqlx::query_as::<_, CompletedTotals>(
            r"
            SELECT COUNT(DISTINCT o.id) AS orders,
                   COALESCE(SUM(oi.quantity * oi.unit_price), 0) AS revenue
            FROM orders o
            JOIN order_items oi ON oi.order_id = o.id
            WHERE o.status = 'completed'
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_interval_parse() {
        assert_eq!("day".parse::<RevenueInterval>(), Ok(RevenueInterval::Day));
        assert_eq!("week".parse::<RevenueInterval>(), Ok(RevenueInterval::Week));
        assert_eq!(
            "month".parse::<RevenueInterval>(),
            Ok(RevenueInterval::Month)
        );
        assert!("year".parse::<RevenueInterval>().is_err());
        assert!("".parse::<RevenueInterval>().is_err());
    }

    #[test]
    fn test_revenue_interval_as_str() {
        assert_eq!(RevenueInterval::Day.as_str(), "day");
        assert_eq!(RevenueInterval::Week.as_str(), "week");
        assert_eq!(RevenueInterval::Month.as_str(), "month");
    }
}
