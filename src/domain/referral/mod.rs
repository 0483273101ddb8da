//! Referral credit table.
//!
//! Credits are a fixed lookup keyed by purchase category and are not editable
//! at runtime. Amounts are whole major currency units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::Currency;

/// Credit granted when the category is not recognized.
pub const DEFAULT_CREDIT: i64 = 50;

/// What the referred user bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseCategory {
    Workshop,
    Event,
    Other,
}

impl PurchaseCategory {
    /// Fixed credit for this category, in major units.
    pub fn credit_amount(&self) -> i64 {
        match self {
            PurchaseCategory::Workshop => 200,
            PurchaseCategory::Event => 100,
            PurchaseCategory::Other => DEFAULT_CREDIT,
        }
    }
}

impl FromStr for PurchaseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "workshop" => Ok(PurchaseCategory::Workshop),
            "event" => Ok(PurchaseCategory::Event),
            "other" => Ok(PurchaseCategory::Other),
            unknown => Err(format!("unknown purchase category '{}'", unknown)),
        }
    }
}

impl fmt::Display for PurchaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PurchaseCategory::Workshop => "workshop",
            PurchaseCategory::Event => "event",
            PurchaseCategory::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// A resolved referral credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralCredit {
    pub purchase_category: PurchaseCategory,
    /// Major currency units.
    pub credit_amount: i64,
}

impl ReferralCredit {
    /// The credit in minor units of `currency`, ready for the price calculator.
    pub fn minor_units(&self, currency: &Currency) -> i64 {
        self.credit_amount
            .saturating_mul(currency.minor_units_per_major())
    }
}

/// Maps a purchase category to its credit. Never fails.
pub struct ReferralCreditResolver;

impl ReferralCreditResolver {
    /// Resolves `category` against the fixed table.
    ///
    /// Unrecognized categories fall back to [`DEFAULT_CREDIT`] and are logged
    /// at `warn`, since they usually indicate a typo upstream.
    pub fn credit_for(category: &str) -> ReferralCredit {
        let purchase_category = match category.parse::<PurchaseCategory>() {
            Ok(c) => c,
            Err(_) => {
                tracing::warn!(
                    category = %category,
                    default_credit = DEFAULT_CREDIT,
                    "Unrecognized referral purchase category, applying default credit"
                );
                PurchaseCategory::Other
            }
        };

        ReferralCredit {
            purchase_category,
            credit_amount: purchase_category.credit_amount(),
        }
    }
}
