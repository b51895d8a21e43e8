//! Money amounts in minor units with currency information.
//!
//! The checkout wire format (and the payment provider) works in minor units
//! (cents), so `Price` stores an `i64` cent amount rather than a decimal.
//! Product catalog columns remain `NUMERIC(10,2)` and are read as
//! `rust_decimal::Decimal` directly; this type is for amounts crossing the
//! payment boundary.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is negative.
    #[error("price amount cannot be negative: {0}")]
    Negative(i64),
    /// The currency code is not supported by the storefront.
    #[error("unsupported currency code: {0}")]
    UnsupportedCurrency(String),
}

/// A non-negative amount of money in minor units (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the smallest currency unit (cents).
    amount_minor: i64,
    /// ISO 4217 currency code.
    currency: CurrencyCode,
}

impl Price {
    /// Create a price from an amount in minor units.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount_minor` is negative.
    pub const fn from_minor(amount_minor: i64, currency: CurrencyCode) -> Result<Self, PriceError> {
        if amount_minor < 0 {
            return Err(PriceError::Negative(amount_minor));
        }
        Ok(Self {
            amount_minor,
            currency,
        })
    }

    /// Amount in minor units (cents).
    #[must_use]
    pub const fn amount_minor(&self) -> i64 {
        self.amount_minor
    }

    /// The currency of this price.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }
}

impl fmt::Display for Price {
    /// Format for display, e.g. `€129.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.amount_minor / 100;
        let cents = (self.amount_minor % 100).unsigned_abs();
        write!(f, "{}{units}.{cents:02}", self.currency.symbol())
    }
}

/// ISO 4217 currency codes accepted by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    #[default]
    Eur,
    Usd,
}

impl CurrencyCode {
    /// The uppercase ISO 4217 code, e.g. `"EUR"`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Usd => "USD",
        }
    }

    /// The display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Eur => "€",
            Self::Usd => "$",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = PriceError;

    /// Parse a currency code case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EUR" => Ok(Self::Eur),
            "USD" => Ok(Self::Usd),
            other => Err(PriceError::UnsupportedCurrency(other.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor_rejects_negative() {
        assert_eq!(
            Price::from_minor(-1, CurrencyCode::Eur),
            Err(PriceError::Negative(-1))
        );
    }

    #[test]
    fn test_display() {
        let price = Price::from_minor(12_900, CurrencyCode::Eur).unwrap();
        assert_eq!(price.to_string(), "€129.00");

        let price = Price::from_minor(5, CurrencyCode::Usd).unwrap();
        assert_eq!(price.to_string(), "$0.05");
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("eur".parse::<CurrencyCode>().unwrap(), CurrencyCode::Eur);
        assert_eq!("USD".parse::<CurrencyCode>().unwrap(), CurrencyCode::Usd);
        assert!(matches!(
            "GBP".parse::<CurrencyCode>(),
            Err(PriceError::UnsupportedCurrency(_))
        ));
    }

    #[test]
    fn test_currency_serde() {
        assert_eq!(
            serde_json::to_string(&CurrencyCode::Eur).unwrap(),
            "\"EUR\""
        );
        let parsed: CurrencyCode = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(parsed, CurrencyCode::Usd);
    }
}
