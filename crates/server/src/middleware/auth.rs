//! Admin authentication extractor.
//!
//! The back-office session is a single HttpOnly cookie, `admin_auth=true`,
//! set at login with a one-day Max-Age. There is no server-side session
//! store; the cookie value itself is the whole session state.

use axum::{
    Json,
    extract::{FromRequestParts, OriginalUri},
    http::{HeaderMap, StatusCode, header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

/// Name of the admin session cookie.
pub const ADMIN_COOKIE: &str = "admin_auth";

/// Cookie lifetime: one day, matching the login session length.
const COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24;

/// Extractor that requires the admin session cookie.
///
/// If the cookie is absent (or not `"true"`), API requests get a 401 JSON
/// response and page requests are redirected to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_admin: RequireAdmin) -> impl IntoResponse {
///     "back office"
/// }
/// ```
#[derive(Debug)]
pub struct RequireAdmin;

/// Error returned when admin authentication is required but absent.
pub enum AdminAuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/admin/login").into_response(),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized" })),
            )
                .into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if has_admin_cookie(&parts.headers) {
            return Ok(Self);
        }

        // API requests get a status; page requests get the login redirect.
        // Nested routers strip their prefix from `parts.uri`, so classify
        // on the original request path.
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map_or_else(|| parts.uri.path(), |uri| uri.0.path());
        if path.starts_with("/api/") {
            Err(AdminAuthRejection::Unauthorized)
        } else {
            Err(AdminAuthRejection::RedirectToLogin)
        }
    }
}

/// Check whether the request carries `admin_auth=true`.
fn has_admin_cookie(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == ADMIN_COOKIE && value == "true")
}

/// The `Set-Cookie` value that opens an admin session.
#[must_use]
pub fn build_auth_cookie() -> String {
    format!("{ADMIN_COOKIE}=true; Max-Age={COOKIE_MAX_AGE_SECS}; Path=/; HttpOnly; SameSite=Lax")
}

/// The `Set-Cookie` value that closes the admin session.
#[must_use]
pub fn clear_auth_cookie() -> String {
    format!("{ADMIN_COOKIE}=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{HeaderValue, Request};

    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_accepts_admin_cookie() {
        assert!(has_admin_cookie(&headers_with_cookie("admin_auth=true")));
        assert!(has_admin_cookie(&headers_with_cookie(
            "theme=dark; admin_auth=true; lang=fr"
        )));
    }

    #[test]
    fn test_rejects_missing_or_wrong_value() {
        assert!(!has_admin_cookie(&HeaderMap::new()));
        assert!(!has_admin_cookie(&headers_with_cookie("admin_auth=false")));
        assert!(!has_admin_cookie(&headers_with_cookie("admin_auth=")));
        assert!(!has_admin_cookie(&headers_with_cookie("theme=dark")));
    }

    #[test]
    fn test_rejects_lookalike_names() {
        assert!(!has_admin_cookie(&headers_with_cookie("xadmin_auth=true")));
        assert!(!has_admin_cookie(&headers_with_cookie("admin_auth2=true")));
    }

    #[test]
    fn test_extractor_is_debug() {
        // Handlers record extractor arguments through tracing spans.
        assert_eq!(format!("{RequireAdmin:?}"), "RequireAdmin");
    }

    async fn rejection_status_for(original_path: &str) -> StatusCode {
        let (mut parts, ()) = Request::builder()
            .uri("/inventory")
            .body(())
            .unwrap()
            .into_parts();
        parts
            .extensions
            .insert(OriginalUri(original_path.parse().unwrap()));
        let rejection = RequireAdmin::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        rejection.into_response().status()
    }

    #[tokio::test]
    async fn test_api_request_rejected_with_unauthorized() {
        // Nested routers see a stripped uri; the original path decides.
        let status = rejection_status_for("/api/admin/inventory").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_page_request_rejected_with_redirect() {
        let status = rejection_status_for("/admin/inventory").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
    }

    #[test]
    fn test_build_auth_cookie_shape() {
        let cookie = build_auth_cookie();
        assert!(cookie.starts_with("admin_auth=true"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
    }

    #[test]
    fn test_clear_auth_cookie_expires() {
        let cookie = clear_auth_cookie();
        assert!(cookie.starts_with("admin_auth=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
