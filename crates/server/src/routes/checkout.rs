//! Checkout route handler: hosted payment page handoff.
//!
//! Validation happens entirely before the payment provider is contacted;
//! a request missing any required field never leaves the process.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use atelier_noir_core::{CurrencyCode, Price};

use crate::error::{AppError, Result};
use crate::services::stripe::CheckoutLineItem;
use crate::state::AppState;

/// Checkout request body. All fields are required; `amount` is the unit
/// price in minor units (cents).
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub product_name: Option<String>,
    pub amount: Option<i64>,
    pub quantity: Option<u32>,
    pub currency: Option<String>,
}

/// Checkout response: the hosted payment page URL to redirect to.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
}

/// Create a hosted checkout session.
///
/// POST /api/checkout
#[instrument(skip(state, body))]
pub async fn create_session(
    State(state): State<AppState>,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let item = validate_request(&body).map_err(AppError::BadRequest)?;

    let session = state.stripe().create_checkout_session(&item).await?;

    tracing::info!(session_id = %session.id, "Checkout session created");
    Ok(Json(CheckoutResponse { url: session.url }))
}

/// Validate the request and convert it into a line item.
///
/// Returns a client-facing message naming the first problem found.
fn validate_request(body: &CheckoutRequest) -> std::result::Result<CheckoutLineItem, String> {
    let product_name = body
        .product_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "product_name is required".to_string())?;

    let amount = body.amount.ok_or_else(|| "amount is required".to_string())?;

    let quantity = body
        .quantity
        .ok_or_else(|| "quantity is required".to_string())?;
    if quantity < 1 {
        return Err("quantity must be at least 1".to_string());
    }

    let currency = body
        .currency
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "currency is required".to_string())?;
    let currency: CurrencyCode = currency.parse().map_err(|e| format!("{e}"))?;

    let price = Price::from_minor(amount, currency).map_err(|e| format!("{e}"))?;

    Ok(CheckoutLineItem {
        product_name: product_name.to_string(),
        price,
        quantity,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn full_request() -> CheckoutRequest {
        CheckoutRequest {
            product_name: Some("Manteau Brume".to_string()),
            amount: Some(42_000),
            quantity: Some(1),
            currency: Some("EUR".to_string()),
        }
    }

    #[test]
    fn test_valid_request() {
        let item = validate_request(&full_request()).unwrap();
        assert_eq!(item.product_name, "Manteau Brume");
        assert_eq!(item.price.amount_minor(), 42_000);
        assert_eq!(item.price.currency(), CurrencyCode::Eur);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_each_missing_field_rejected() {
        let mut req = full_request();
        req.product_name = None;
        assert!(validate_request(&req).unwrap_err().contains("product_name"));

        let mut req = full_request();
        req.amount = None;
        assert!(validate_request(&req).unwrap_err().contains("amount"));

        let mut req = full_request();
        req.quantity = None;
        assert!(validate_request(&req).unwrap_err().contains("quantity"));

        let mut req = full_request();
        req.currency = None;
        assert!(validate_request(&req).unwrap_err().contains("currency"));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut req = full_request();
        req.product_name = Some("   ".to_string());
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut req = full_request();
        req.quantity = Some(0);
        assert!(validate_request(&req).unwrap_err().contains("quantity"));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut req = full_request();
        req.amount = Some(-100);
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn test_unsupported_currency_rejected() {
        let mut req = full_request();
        req.currency = Some("GBP".to_string());
        assert!(validate_request(&req).unwrap_err().contains("GBP"));
    }
}
