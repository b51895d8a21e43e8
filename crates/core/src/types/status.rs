//! Status enums for catalog and order entities.
//!
//! Statuses are stored as lowercase TEXT columns (`active`, `pre-order`,
//! `out-of-stock`, ...), so the sqlx codecs go through the string forms
//! rather than a Postgres enum type.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProductStatus {
    /// In stock and purchasable.
    #[default]
    Active,
    /// Announced with a pre-order date, not yet shipping.
    PreOrder,
    /// Listed but currently unavailable.
    OutOfStock,
}

impl ProductStatus {
    /// All statuses visible on customer-facing surfaces.
    pub const STOREFRONT_VISIBLE: [Self; 3] = [Self::Active, Self::PreOrder, Self::OutOfStock];

    /// The lowercase column value, e.g. `"pre-order"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::PreOrder => "pre-order",
            Self::OutOfStock => "out-of-stock",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "pre-order" => Ok(Self::PreOrder),
            "out-of-stock" => Ok(Self::OutOfStock),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}

/// Payment status of an order.
///
/// Analytics aggregations only count `completed` orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// The lowercase column value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Newsletter subscriber status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriberStatus {
    #[default]
    Subscribed,
    Unsubscribed,
}

impl SubscriberStatus {
    /// The lowercase column value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Subscribed => "subscribed",
            Self::Unsubscribed => "unsubscribed",
        }
    }
}

impl std::fmt::Display for SubscriberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubscriberStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subscribed" => Ok(Self::Subscribed),
            "unsubscribed" => Ok(Self::Unsubscribed),
            _ => Err(format!("invalid subscriber status: {s}")),
        }
    }
}

// SQLx codecs over the TEXT column values (with postgres feature).
#[cfg(feature = "postgres")]
macro_rules! impl_text_status {
    ($name:ident) => {
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                s.parse::<Self>().map_err(Into::into)
            }
        }

        impl sqlx::Encode<'_, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }
    };
}

#[cfg(feature = "postgres")]
impl_text_status!(ProductStatus);
#[cfg(feature = "postgres")]
impl_text_status!(OrderStatus);
#[cfg(feature = "postgres")]
impl_text_status!(SubscriberStatus);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_status_roundtrip() {
        for status in ProductStatus::STOREFRONT_VISIBLE {
            assert_eq!(status.as_str().parse::<ProductStatus>().unwrap(), status);
        }
        assert!("archived".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn test_product_status_serde_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ProductStatus::PreOrder).unwrap(),
            "\"pre-order\""
        );
        let parsed: ProductStatus = serde_json::from_str("\"out-of-stock\"").unwrap();
        assert_eq!(parsed, ProductStatus::OutOfStock);
    }

    #[test]
    fn test_order_status_roundtrip() {
        assert_eq!("completed".parse::<OrderStatus>().unwrap(), OrderStatus::Completed);
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
        assert!("paid".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_subscriber_status_roundtrip() {
        assert_eq!(
            "subscribed".parse::<SubscriberStatus>().unwrap(),
            SubscriberStatus::Subscribed
        );
        assert_eq!(SubscriberStatus::Unsubscribed.to_string(), "unsubscribed");
    }
}
