//! Checkout domain - coupons and prices as the payment provider reports them.

mod coupon;
mod price;
mod provider_id;

pub use coupon::{Coupon, CouponCode, CouponDiscount};
pub use price::{Price, PriceType};
pub use provider_id::ProviderId;
