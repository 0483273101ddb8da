//! Foundation module - Shared domain primitives.
//!
//! Contains value objects and error types that form the vocabulary of the
//! checkout domain.

mod currency;
mod errors;

pub use currency::Currency;
pub use errors::{CheckoutError, ErrorCode, ValidationError};
