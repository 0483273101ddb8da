//! Capability token adapters.

mod jwt;

pub use jwt::JwtAccessTokenService;
