//! Clients for external services (payments, blob storage).

pub mod blob;
pub mod stripe;
