//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port for Stripe integration, including:
//! - Coupon lookup
//! - Price lookup
//! - One-time payment checkout sessions and their metadata
//!
//! # Security
//!
//! - The secret API key is handled via `secrecy::SecretString`
//! - Stripe error bodies are logged, never forwarded to clients
//!
//! # Configuration
//!
//! Required environment variables:
//! - `CHECKOUT_CORE__PAYMENT__STRIPE_API_KEY`: Stripe secret API key

mod api_types;
mod mock_payment_provider;
mod stripe_adapter;

pub use api_types::{
    StripeApiError, StripeCheckoutSession, StripeCoupon, StripeErrorEnvelope, StripePrice,
};
pub use mock_payment_provider::{MethodCall, MockPaymentProvider};
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter, DEFAULT_API_BASE_URL};
