//! Identifiers of provider-side objects (prices, checkout sessions).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

const MAX_ID_LENGTH: usize = 255;

/// A provider object ID such as `price_1Nx...` or `cs_test_...`.
///
/// Only ASCII letters, digits and `_` are accepted. IDs end up as a path
/// segment of an authenticated provider URL, so `/`, `.` and `%` never pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn try_new(field: &str, id: &str) -> Result<Self, ValidationError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        if id.len() > MAX_ID_LENGTH {
            return Err(ValidationError::out_of_range(
                field,
                1,
                MAX_ID_LENGTH as i64,
                id.len() as i64,
            ));
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ValidationError::invalid_format(
                field,
                "letters, digits and '_' only",
            ));
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_provider_shaped_ids() {
        assert_eq!(
            ProviderId::try_new("priceId", " price_1NxAbc ").unwrap().as_str(),
            "price_1NxAbc"
        );
        assert!(ProviderId::try_new("sessionId", "cs_test_a1B2c3").is_ok());
    }

    #[test]
    fn rejects_path_characters() {
        for id in [
            "../customers/cus_x",
            "price_1/../../v1/customers",
            "price%2F..",
            "price.1",
            "price 1",
            "price_1?expand=x",
        ] {
            assert!(ProviderId::try_new("priceId", id).is_err(), "{id}");
        }
    }

    #[test]
    fn rejects_blank_and_oversized() {
        assert!(ProviderId::try_new("priceId", "  ").is_err());
        assert!(ProviderId::try_new("priceId", &"a".repeat(MAX_ID_LENGTH + 1)).is_err());
    }
}
