//! Stripe API client for hosted checkout sessions.
//!
//! Checkout is a pass-through: one dynamic line item, the requested
//! currency, and a redirect URL back to the storefront. No local order
//! state is created here.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use atelier_noir_core::Price;

use crate::config::AppConfig;

/// Stripe API base URL.
const BASE_URL: &str = "https://api.stripe.com/v1";

/// Errors that can occur when interacting with the Stripe API.
#[derive(Debug, Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A single dynamic line item for a checkout session.
#[derive(Debug, Clone)]
pub struct CheckoutLineItem {
    /// Display name shown on the hosted payment page.
    pub product_name: String,
    /// Unit price in minor units with currency.
    pub price: Price,
    /// Quantity, at least 1.
    pub quantity: u32,
}

/// A created checkout session: the hosted payment page handoff.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    /// Session ID (`cs_...`).
    pub id: String,
    /// URL of the hosted payment page to redirect the customer to.
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: Option<String>,
}

/// Stripe API client.
#[derive(Clone)]
pub struct StripeClient {
    client: reqwest::Client,
    base_url: String,
}

impl StripeClient {
    /// Create a new Stripe API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &AppConfig) -> Result<Self, StripeError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.stripe_secret_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| StripeError::Parse(format!("Invalid API key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert("Authorization", auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Create a hosted checkout session for a single line item.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or the response carries no
    /// redirect URL.
    #[instrument(skip(self), fields(product = %item.product_name))]
    pub async fn create_checkout_session(
        &self,
        item: &CheckoutLineItem,
    ) -> Result<CheckoutSession, StripeError> {
        let url = format!("{BASE_URL}/checkout/sessions");
        let params = session_params(&self.base_url, item);

        let response = self.client.post(&url).form(&params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StripeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| StripeError::Parse(e.to_string()))?;

        let redirect_url = session
            .url
            .ok_or_else(|| StripeError::Parse("session response has no url".to_string()))?;

        Ok(CheckoutSession {
            id: session.id,
            url: redirect_url,
        })
    }
}

/// Build the form parameters for a single-line-item checkout session.
fn session_params(base_url: &str, item: &CheckoutLineItem) -> Vec<(String, String)> {
    vec![
        ("mode".to_string(), "payment".to_string()),
        (
            "success_url".to_string(),
            format!("{base_url}/checkout/success?session_id={{CHECKOUT_SESSION_ID}}"),
        ),
        (
            "cancel_url".to_string(),
            format!("{base_url}/checkout/cancel"),
        ),
        (
            "line_items[0][price_data][currency]".to_string(),
            item.price.currency().code().to_lowercase(),
        ),
        (
            "line_items[0][price_data][unit_amount]".to_string(),
            item.price.amount_minor().to_string(),
        ),
        (
            "line_items[0][price_data][product_data][name]".to_string(),
            item.product_name.clone(),
        ),
        (
            "line_items[0][quantity]".to_string(),
            item.quantity.to_string(),
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use atelier_noir_core::CurrencyCode;

    use super::*;

    fn sample_item() -> CheckoutLineItem {
        CheckoutLineItem {
            product_name: "Robe Lumière".to_string(),
            price: Price::from_minor(18_500, CurrencyCode::Eur).unwrap(),
            quantity: 2,
        }
    }

    #[test]
    fn test_session_params_line_item() {
        let params = session_params("https://ateliernoir.example", &sample_item());
        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };

        assert_eq!(get("mode"), "payment");
        assert_eq!(get("line_items[0][price_data][currency]"), "eur");
        assert_eq!(get("line_items[0][price_data][unit_amount]"), "18500");
        assert_eq!(
            get("line_items[0][price_data][product_data][name]"),
            "Robe Lumière"
        );
        assert_eq!(get("line_items[0][quantity]"), "2");
    }

    #[test]
    fn test_session_params_redirect_urls() {
        let params = session_params("https://ateliernoir.example", &sample_item());
        let success = params
            .iter()
            .find(|(k, _)| k == "success_url")
            .map(|(_, v)| v.as_str())
            .unwrap();

        assert!(success.starts_with("https://ateliernoir.example/checkout/success"));
        assert!(success.contains("{CHECKOUT_SESSION_ID}"));
    }
}
