//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;

/// Canonical euro rendering, shared with the admin view models.
#[must_use]
pub fn format_euros(amount: Decimal) -> String {
    format!("\u{20ac}{amount:.2}")
}

/// Formats a decimal amount as euros, e.g. `129.5` becomes `€129.50`.
///
/// Usage in templates: `{{ order.total|euros }}`
#[askama::filter_fn]
pub fn euros(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let amount: Decimal = value
        .to_string()
        .parse()
        .map_err(|e| askama::Error::Custom(Box::new(e)))?;
    Ok(format_euros(amount))
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_euros_keeps_decimal_precision() {
        assert_eq!(format_euros(Decimal::new(12950, 2)), "\u{20ac}129.50");
        assert_eq!(format_euros(Decimal::new(1295, 1)), "\u{20ac}129.50");
        assert_eq!(format_euros(Decimal::ZERO), "\u{20ac}0.00");
    }
}
