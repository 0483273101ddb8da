//! Display formatting for minor-unit amounts.

use rust_decimal::Decimal;

use crate::domain::foundation::Currency;

/// Formats `minor` units as `"CAD 216.00"`. Pure presentation; never fed back into totals.
pub fn format_amount(minor: i64, currency: &Currency) -> String {
    let major = Decimal::new(minor, currency.minor_unit_exponent());
    format!("{} {}", currency, major)
}
