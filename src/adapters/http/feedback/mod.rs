//! HTTP adapter for speaker feedback links.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::feedback_routes;
