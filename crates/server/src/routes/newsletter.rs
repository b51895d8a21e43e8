//! Newsletter route handlers.
//!
//! Subscription is insert-if-absent keyed by lowercased email; duplicates
//! are reported, not errored. Deletion is a back-office operation.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use atelier_noir_core::Email;

use crate::db::SubscriberRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::Subscriber;
use crate::state::AppState;

/// Subscribe request body.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: Option<String>,
}

/// Subscribe response body. The wire field is `isNew` for client
/// compatibility.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    #[serde(rename = "isNew")]
    pub is_new: bool,
    pub message: String,
}

/// Delete request body (back office).
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub email: Option<String>,
}

/// Subscriber list response (back office).
#[derive(Debug, Serialize)]
pub struct SubscriberListResponse {
    pub total: i64,
    pub subscribers: Vec<Subscriber>,
}

/// Subscribe to the newsletter.
///
/// POST /api/newsletter
#[instrument(skip(state, body))]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>> {
    let email = parse_email(body.email.as_deref())?;

    let is_new = SubscriberRepository::new(state.pool())
        .subscribe(&email)
        .await?;

    if is_new {
        tracing::info!(email = %email, "Newsletter subscription");
    } else {
        tracing::debug!(email = %email, "Duplicate newsletter subscription");
    }

    let message = if is_new {
        "Welcome to the list.".to_string()
    } else {
        "You are already subscribed.".to_string()
    };

    Ok(Json(SubscribeResponse {
        success: true,
        is_new,
        message,
    }))
}

/// Delete a subscriber by email key.
///
/// DELETE /api/admin/subscribers
#[instrument(skip(state, body))]
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<DeleteRequest>,
) -> Result<Response> {
    let email = parse_email(body.email.as_deref())?;

    let deleted = SubscriberRepository::new(state.pool())
        .delete(&email)
        .await?;

    if !deleted {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "No subscriber with that email" })),
        )
            .into_response());
    }

    tracing::info!(email = %email, "Subscriber deleted");
    Ok(Json(json!({ "success": true })).into_response())
}

/// List subscribers with a total count.
///
/// GET /api/admin/subscribers
#[instrument(skip(state))]
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<SubscriberListResponse>> {
    let repo = SubscriberRepository::new(state.pool());
    let subscribers = repo.list().await?;
    let total = repo.count().await?;

    Ok(Json(SubscriberListResponse { total, subscribers }))
}

/// Parse the optional email field into a validated `Email`.
fn parse_email(raw: Option<&str>) -> Result<Email> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("email is required".to_string()))?;

    Email::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_email_normalizes() {
        let email = parse_email(Some("  Maud@Example.COM ")).unwrap();
        assert_eq!(email.as_str(), "maud@example.com");
    }

    #[test]
    fn test_parse_email_missing() {
        assert!(matches!(parse_email(None), Err(AppError::BadRequest(_))));
        assert!(matches!(
            parse_email(Some("   ")),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_parse_email_structural() {
        assert!(parse_email(Some("not-an-email")).is_err());
        assert!(parse_email(Some("user@")).is_err());
        assert!(parse_email(Some("user@domain")).is_ok());
        assert!(parse_email(Some("user@domain.com")).is_ok());
    }
}
