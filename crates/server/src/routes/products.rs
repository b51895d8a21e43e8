//! Storefront catalog route handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::models::{CategoryCount, Product};
use crate::state::AppState;

/// Catalog listing response.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub products: Vec<Product>,
}

/// Per-category aggregation response.
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryCount>,
}

/// Storefront product listing: everything a customer may see.
///
/// GET /api/products
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<CatalogResponse>> {
    let products = ProductRepository::new(state.pool()).list_available().await?;
    Ok(Json(CatalogResponse { products }))
}

/// Active product count per category.
///
/// GET /api/products/categories
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<CategoriesResponse>> {
    let categories = ProductRepository::new(state.pool()).categories().await?;
    Ok(Json(CategoriesResponse { categories }))
}
