//! Boundary checks shared by handlers. Every check runs before any port call.

use crate::domain::checkout::ProviderId;
use crate::domain::foundation::CheckoutError;

/// Trimmed value of a required text field, or `InvalidInput(message)` when
/// it is absent or blank.
pub(crate) fn require<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, CheckoutError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CheckoutError::invalid_input(message)),
    }
}

/// Trimmed value of an optional text field; blank counts as absent.
pub(crate) fn optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A required provider object ID, e.g. `priceId`. Blank gives
/// `"Missing {field}"`, anything that is not a plain ID gives `"Invalid {field}"`.
pub(crate) fn provider_id(value: Option<&str>, field: &str) -> Result<ProviderId, CheckoutError> {
    let raw = require(value, &format!("Missing {}", field))?;
    ProviderId::try_new(field, raw).map_err(|e| {
        tracing::debug!(field, error = %e, "Rejected malformed provider ID");
        CheckoutError::invalid_input(format!("Invalid {}", field))
    })
}

/// Quantity of at least one; defaults to one when absent.
pub(crate) fn positive_quantity(value: Option<i64>) -> Result<u32, CheckoutError> {
    match value {
        None => Ok(1),
        Some(q) if q >= 1 => u32::try_from(q).map_err(|_| CheckoutError::invalid_input("Invalid quantity")),
        Some(_) => Err(CheckoutError::invalid_input("Invalid quantity")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_blank() {
        assert!(require(None, "Missing id").is_err());
        assert!(require(Some("   "), "Missing id").is_err());
        assert_eq!(require(Some(" x "), "Missing id").unwrap(), "x");
    }

    #[test]
    fn optional_treats_blank_as_absent() {
        assert_eq!(optional(Some("  ")), None);
        assert_eq!(optional(Some(" a ")), Some("a"));
    }

    #[test]
    fn provider_id_rejects_traversal() {
        assert_eq!(
            provider_id(Some("../customers/cus_x"), "priceId"),
            Err(CheckoutError::invalid_input("Invalid priceId"))
        );
        assert_eq!(
            provider_id(Some(" "), "priceId"),
            Err(CheckoutError::invalid_input("Missing priceId"))
        );
        assert_eq!(provider_id(Some(" price_1 "), "priceId").unwrap().as_str(), "price_1");
    }

    #[test]
    fn quantity_rules() {
        assert_eq!(positive_quantity(None).unwrap(), 1);
        assert_eq!(positive_quantity(Some(3)).unwrap(), 3);
        assert_eq!(
            positive_quantity(Some(0)),
            Err(CheckoutError::invalid_input("Invalid quantity"))
        );
        assert!(positive_quantity(Some(-2)).is_err());
        assert!(positive_quantity(Some(i64::MAX)).is_err());
    }
}
