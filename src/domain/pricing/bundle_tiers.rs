//! Quantity-tier (bundle) discount table.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A single tier: buying at least `min_quantity` earns `percent_off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleTier {
    pub min_quantity: u32,
    pub percent_off: Decimal,
}

/// Ordered set of quantity tiers. The highest tier whose threshold is met wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleTiers {
    tiers: Vec<BundleTier>,
}

impl BundleTiers {
    /// Builds a tier table; tiers are sorted by threshold.
    pub fn new(mut tiers: Vec<BundleTier>) -> Self {
        tiers.sort_by_key(|t| t.min_quantity);
        Self { tiers }
    }

    /// A table that never discounts.
    pub fn none() -> Self {
        Self { tiers: Vec::new() }
    }

    /// Discount percentage for a purchase of `quantity` units.
    pub fn percent_for(&self, quantity: u32) -> Decimal {
        self.tiers
            .iter()
            .rev()
            .find(|t| quantity >= t.min_quantity)
            .map(|t| t.percent_off)
            .unwrap_or(Decimal::ZERO)
    }
}

impl Default for BundleTiers {
    fn default() -> Self {
        Self::new(vec![
            BundleTier {
                min_quantity: 2,
                percent_off: dec!(10),
            },
            BundleTier {
                min_quantity: 4,
                percent_off: dec!(15),
            },
            BundleTier {
                min_quantity: 10,
                percent_off: dec!(20),
            },
        ])
    }
}
