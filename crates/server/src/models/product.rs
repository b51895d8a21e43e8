//! Catalog product rows.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use atelier_noir_core::{ProductId, ProductStatus};

/// A catalog product as stored in the `products` table.
///
/// Prices are carried in both house currencies; `images`, `materials` and
/// `essences` are Postgres text arrays.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub price_eur: Decimal,
    pub price_usd: Decimal,
    pub images: Vec<String>,
    pub category: String,
    pub materials: Vec<String>,
    pub essences: Vec<String>,
    pub product_code: String,
    pub quantity_available: i32,
    pub quantity_total: i32,
    pub preorder_date: Option<NaiveDate>,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of the per-category aggregation (active products only).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryCount {
    pub category: String,
    pub product_count: i64,
}
