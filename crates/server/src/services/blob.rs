//! Managed blob store client for image uploads.
//!
//! Files are PUT to the store under a randomized pathname; the store
//! responds with the public URL the storefront serves the image from.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::config::AppConfig;

/// Blob store base URL.
const BASE_URL: &str = "https://blob.vercel-storage.com";

/// Blob store API version header value.
const API_VERSION: &str = "7";

/// Errors that can occur when interacting with the blob store.
#[derive(Debug, Error)]
pub enum BlobError {
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

#[derive(Debug, Deserialize)]
struct PutResponse {
    url: String,
}

/// Blob store client.
#[derive(Clone)]
pub struct BlobClient {
    client: reqwest::Client,
}

impl BlobClient {
    /// Create a new blob store client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &AppConfig) -> Result<Self, BlobError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.blob_token.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| BlobError::Parse(format!("Invalid token format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert("Authorization", auth_header);
        headers.insert("x-api-version", HeaderValue::from_static(API_VERSION));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Upload a file under `pathname` and return its public URL.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn put(
        &self,
        pathname: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BlobError> {
        let url = format!("{BASE_URL}/{pathname}");

        let response = self
            .client
            .put(&url)
            .header("x-content-type", content_type)
            .body(bytes)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BlobError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let blob: PutResponse = response
            .json()
            .await
            .map_err(|e| BlobError::Parse(e.to_string()))?;

        Ok(blob.url)
    }
}
