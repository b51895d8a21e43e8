//! Row models mapped from the database.

pub mod order;
pub mod product;
pub mod subscriber;

pub use order::OrderSummary;
pub use product::{CategoryCount, Product};
pub use subscriber::Subscriber;
