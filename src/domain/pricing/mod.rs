//! Pricing domain - bundle tiers, the discount pipeline and amount formatting.

mod bundle_tiers;
mod calculator;
mod format;

pub use bundle_tiers::{BundleTier, BundleTiers};
pub use calculator::{
    apply_coupon, AddOn, DiscountContext, DiscountStep, LineItem, LineItemKind, PriceBreakdown,
    PriceCalculator,
};
pub use format::format_amount;
