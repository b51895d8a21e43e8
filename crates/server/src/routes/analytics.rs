//! Analytics route handlers (back office).
//!
//! Pure reporting over completed orders, recomputed per request.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::OrderRepository;
use crate::db::orders::{RevenueInterval, RevenuePoint, TopProduct};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// How many products the top-products report returns.
const TOP_PRODUCTS_LIMIT: i64 = 5;

/// Query parameters for the revenue report.
#[derive(Debug, Deserialize)]
pub struct RevenueQuery {
    /// Bucketing interval: `day` (default), `week`, or `month`.
    pub bucket: Option<String>,
}

/// Revenue report response.
#[derive(Debug, Serialize)]
pub struct RevenueResponse {
    pub bucket: String,
    pub points: Vec<RevenuePoint>,
}

/// Top-products report response.
#[derive(Debug, Serialize)]
pub struct TopProductsResponse {
    pub products: Vec<TopProduct>,
}

/// Revenue bucketed by day, week, or month.
///
/// GET /api/admin/analytics/revenue?bucket=day|week|month
#[instrument(skip(state))]
pub async fn revenue(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<RevenueQuery>,
) -> Result<Json<RevenueResponse>> {
    let interval = parse_interval(query.bucket.as_deref())?;

    let points = OrderRepository::new(state.pool()).revenue(interval).await?;

    Ok(Json(RevenueResponse {
        bucket: interval.as_str().to_string(),
        points,
    }))
}

/// Top five products by units sold.
///
/// GET /api/admin/analytics/top-products
#[instrument(skip(state))]
pub async fn top_products(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<TopProductsResponse>> {
    let products = OrderRepository::new(state.pool())
        .top_products(TOP_PRODUCTS_LIMIT)
        .await?;

    Ok(Json(TopProductsResponse { products }))
}

/// Parse the optional bucket parameter, defaulting to daily.
fn parse_interval(raw: Option<&str>) -> Result<RevenueInterval> {
    match raw {
        None => Ok(RevenueInterval::Day),
        Some(s) => s.parse().map_err(|_| {
            AppError::BadRequest(format!("bucket must be day, week or month (got '{s}')"))
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interval_default() {
        assert_eq!(parse_interval(None).unwrap(), RevenueInterval::Day);
    }

    #[test]
    fn test_parse_interval_values() {
        assert_eq!(parse_interval(Some("week")).unwrap(), RevenueInterval::Week);
        assert_eq!(
            parse_interval(Some("month")).unwrap(),
            RevenueInterval::Month
        );
    }

    #[test]
    fn test_parse_interval_invalid() {
        assert!(matches!(
            parse_interval(Some("year")),
            Err(AppError::BadRequest(_))
        ));
    }
}
