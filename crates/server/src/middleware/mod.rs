//! Request middleware and extractors.

pub mod auth;

pub use auth::{ADMIN_COOKIE, RequireAdmin, build_auth_cookie, clear_auth_cookie};
