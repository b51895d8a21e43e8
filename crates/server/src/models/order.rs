//! Order rows.
//!
//! Orders are written outside this service; this model exists for the
//! read-only analytics and back-office listing paths.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use atelier_noir_core::{OrderId, OrderStatus};

/// An order joined with its item count and total, for the back-office list.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderSummary {
    pub id: OrderId,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub item_count: i64,
    pub total: Decimal,
}
