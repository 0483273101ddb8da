//! Price as reported by the payment provider.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Currency, ValidationError};

/// Billing type of a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    OneTime,
    Recurring,
}

/// A read-only price. `unit_amount` is in minor currency units and never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub id: String,
    pub unit_amount: i64,
    pub currency: Currency,
    #[serde(rename = "type")]
    pub price_type: PriceType,
}

impl Price {
    pub fn try_new(
        id: impl Into<String>,
        unit_amount: i64,
        currency: Currency,
        price_type: PriceType,
    ) -> Result<Self, ValidationError> {
        if unit_amount < 0 {
            return Err(ValidationError::out_of_range(
                "unit_amount",
                0,
                i64::MAX,
                unit_amount,
            ));
        }
        Ok(Self {
            id: id.into(),
            unit_amount,
            currency,
            price_type,
        })
    }
}
