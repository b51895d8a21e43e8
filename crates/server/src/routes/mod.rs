//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! # Storefront API
//! GET    /api/products                    - Storefront-visible products
//! GET    /api/products/categories        - Category counts (active products)
//! POST   /api/checkout                    - Create a Stripe Checkout session
//! POST   /api/newsletter                  - Subscribe to the newsletter
//!
//! # Admin auth
//! POST   /api/admin/login                 - Open an admin cookie session
//! POST   /api/admin/logout                - Expire the admin cookie
//!
//! # Admin API (cookie required)
//! GET    /api/admin/inventory             - Every product, stock included
//! GET    /api/admin/inventory/available   - Storefront-visible products
//! GET    /api/admin/subscribers           - Newsletter list
//! DELETE /api/admin/subscribers           - Remove a subscriber by email
//! POST   /api/admin/uploads               - Upload product images (multipart)
//! GET    /api/admin/analytics/revenue     - Bucketed revenue (day|week|month)
//! GET    /api/admin/analytics/top-products - Best sellers by units sold
//!
//! # Admin pages (cookie required except login)
//! GET    /admin/login                     - Login page
//! GET    /admin                           - Dashboard
//! GET    /admin/inventory                 - Inventory table
//! GET    /admin/orders                    - Recent orders
//! GET    /admin/analytics                 - Revenue and best sellers
//! GET    /admin/newsletter                - Subscriber list
//! ```

pub mod analytics;
pub mod auth;
pub mod checkout;
pub mod dashboard;
pub mod inventory;
pub mod newsletter;
pub mod products;
pub mod upload;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::state::AppState;

/// Uploads carry up to ten 2 MB images plus multipart framing.
const UPLOAD_BODY_LIMIT: usize = 25 * 1024 * 1024;

/// Create the storefront API router.
pub fn storefront_api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/categories", get(products::categories))
        .route("/checkout", post(checkout::create_session))
        .route("/newsletter", post(newsletter::subscribe))
}

/// Create the admin API router.
pub fn admin_api_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/inventory", get(inventory::list_all))
        .route("/inventory/available", get(inventory::list_available))
        .route("/subscribers", get(newsletter::list).delete(newsletter::delete))
        .route(
            "/uploads",
            post(upload::upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/analytics/revenue", get(analytics::revenue))
        .route("/analytics/top-products", get(analytics::top_products))
}

/// Create the admin pages router.
pub fn admin_page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/login", get(dashboard::login_page))
        .route("/inventory", get(dashboard::inventory_page))
        .route("/orders", get(dashboard::orders_page))
        .route("/analytics", get(dashboard::analytics_page))
        .route("/newsletter", get(dashboard::newsletter_page))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api", storefront_api_routes())
        .nest("/api/admin", admin_api_routes())
        .nest("/admin", admin_page_routes())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{AdminCredentials, AppConfig};

    fn test_state() -> AppState {
        let config = AppConfig {
            database_url: SecretString::from("postgres://localhost/atelier_noir_test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: "http://localhost:3000".to_string(),
            admin: AdminCredentials {
                username: "admin".to_string(),
                password: SecretString::from("kJ8mNx2pQ7rT"),
            },
            stripe_secret_key: SecretString::from("sk_test_kJ8mNx2pQ7rTvW4y"),
            blob_token: SecretString::from("vercel_blob_rw_kJ8mNx2pQ7rTvW4y"),
            sentry_dsn: None,
        };
        // Lazy pool: no connection is made until a query runs.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/atelier_noir_test")
            .unwrap();
        AppState::new(config, pool).unwrap()
    }

    fn app() -> Router {
        routes().with_state(test_state())
    }

    #[tokio::test]
    async fn test_admin_page_without_cookie_redirects_to_login() {
        let response = app()
            .oneshot(Request::get("/admin").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers().get(header::LOCATION).unwrap();
        assert_eq!(location, "/admin/login");
    }

    #[tokio::test]
    async fn test_admin_api_without_cookie_is_unauthorized() {
        let response = app()
            .oneshot(
                Request::get("/api/admin/inventory")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_page_is_public() {
        let response = app()
            .oneshot(Request::get("/admin/login").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_with_wrong_credentials_is_unauthorized() {
        let response = app()
            .oneshot(
                Request::post("/api/admin/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"username":"admin","password":"wrong-password"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_file() {
        let boundary = "atelier-upload-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"files\"; filename=\"look.jpg\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
        // One byte over the per-file limit
        body.extend_from_slice(&vec![0u8; 2 * 1024 * 1024 + 1]);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        // Validation rejects the batch before the blob store is contacted.
        let response = app()
            .oneshot(
                Request::post("/api/admin/uploads")
                    .header(header::COOKIE, "admin_auth=true")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("2MB limit"));
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials_sets_cookie() {
        let response = app()
            .oneshot(
                Request::post("/api/admin/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"username":"admin","password":"kJ8mNx2pQ7rT"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(cookie.starts_with("admin_auth=true"));
        assert!(cookie.contains("HttpOnly"));
    }
}
