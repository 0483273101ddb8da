//! Checkout handlers.
//!
//! ## Commands
//! - Creating a payment checkout session
//!
//! ## Queries
//! - Resolve a coupon code
//! - Get a price
//! - Quote a discounted price for display
//!
//! Quotes and checkout sessions share one pricing step (`PurchasePricer`).

mod create_checkout_session;
mod get_price;
mod price_purchase;
mod quote_price;
mod resolve_coupon;

// Commands
pub use create_checkout_session::{
    CheckoutUrls, CreateCheckoutSessionCommand, CreateCheckoutSessionHandler,
    CreateCheckoutSessionResult,
};

// Queries
pub use get_price::{GetPriceHandler, GetPriceQuery, GetPriceResult};
pub use price_purchase::{AddOnOffer, PricedPurchase, PurchasePricer, PurchaseSelection};
pub use quote_price::{QuotePriceHandler, QuotePriceQuery, QuotePriceResult};
pub use resolve_coupon::{
    ResolveCouponHandler, ResolveCouponQuery, ResolveCouponResult, INVALID_COUPON_MESSAGE,
};
