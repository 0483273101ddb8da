//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    NotFound,

    // Authorization errors
    Unauthorized,

    // Upstream errors
    ProviderError,

    // Infrastructure errors
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::ProviderError => "PROVIDER_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Errors surfaced by the checkout core to its callers.
///
/// | Variant | HTTP Status |
/// |---------|-------------|
/// | InvalidInput | 400 |
/// | NotFound | 404 |
/// | Unauthorized | 401 |
/// | Provider | upstream status, else 500 |
/// | Internal | 500 |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Malformed or missing required input.
    #[error("{0}")]
    InvalidInput(String),

    /// Referenced resource is absent here or at the provider.
    #[error("{0}")]
    NotFound(String),

    /// Capability token is invalid or expired. Deliberately carries no detail.
    #[error("Invalid or expired token")]
    Unauthorized,

    /// Upstream payment/identity/CMS failure.
    #[error("{message}")]
    Provider { status: Option<u16>, message: String },

    /// Unexpected failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CheckoutError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CheckoutError::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CheckoutError::NotFound(message.into())
    }

    pub fn provider(status: Option<u16>, message: impl Into<String>) -> Self {
        CheckoutError::Provider {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CheckoutError::Internal(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CheckoutError::InvalidInput(_) => ErrorCode::ValidationFailed,
            CheckoutError::NotFound(_) => ErrorCode::NotFound,
            CheckoutError::Unauthorized => ErrorCode::Unauthorized,
            CheckoutError::Provider { .. } => ErrorCode::ProviderError,
            CheckoutError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl From<ValidationError> for CheckoutError {
    fn from(err: ValidationError) -> Self {
        CheckoutError::InvalidInput(err.to_string())
    }
}
