//! Inventory listing route handlers (back office).

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Product;
use crate::state::AppState;

/// Inventory listing response.
#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    pub products: Vec<Product>,
}

/// All products, newest first.
///
/// GET /api/admin/inventory
#[instrument(skip(state))]
pub async fn list_all(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<InventoryResponse>> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(InventoryResponse { products }))
}

/// Products in a storefront-visible status only.
///
/// GET /api/admin/inventory/available
#[instrument(skip(state))]
pub async fn list_available(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<InventoryResponse>> {
    let products = ProductRepository::new(state.pool()).list_available().await?;
    Ok(Json(InventoryResponse { products }))
}
