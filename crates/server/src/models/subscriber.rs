//! Newsletter subscriber rows.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use atelier_noir_core::{Email, SubscriberId, SubscriberStatus};

/// A newsletter-list entry keyed by email.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub email: Email,
    pub status: SubscriberStatus,
    pub created_at: DateTime<Utc>,
}
