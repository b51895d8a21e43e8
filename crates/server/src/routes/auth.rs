//! Admin authentication route handlers.
//!
//! Credentials are compared verbatim against the configured environment
//! values; a match opens the cookie session, nothing is hashed or stored.

use axum::{
    Json,
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse},
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{build_auth_cookie, clear_auth_cookie};
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login/logout response body.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
}

/// Log in to the back office.
///
/// POST /api/admin/login
#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let admin = &state.config().admin;

    let matches =
        body.username == admin.username && body.password == *admin.password.expose_secret();

    if !matches {
        tracing::warn!("Failed admin login attempt");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    tracing::info!("Admin login");
    Ok((
        AppendHeaders([(header::SET_COOKIE, build_auth_cookie())]),
        Json(AuthResponse { success: true }),
    ))
}

/// Log out of the back office by expiring the cookie.
///
/// POST /api/admin/logout
#[instrument]
pub async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(header::SET_COOKIE, clear_auth_cookie())]),
        Json(AuthResponse { success: true }),
    )
}
